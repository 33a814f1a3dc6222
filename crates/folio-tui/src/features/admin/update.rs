use crossterm::event::{KeyCode, KeyEvent};
use folio_core::projects::Project;

use super::state::AdminState;

/// What the host should do after an admin key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    None,
    /// Projects were hidden, shown or deleted; the gallery selection may need clamping.
    Changed,
    Save,
    Close,
}

pub fn handle_key(admin: &mut AdminState, projects: &mut Vec<Project>, key: KeyEvent) -> AdminAction {
    if let Some(id) = admin.pending_delete.take() {
        return confirm_delete(admin, projects, &id, key);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            admin.selected = admin.selected.saturating_sub(1);
            AdminAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if admin.selected + 1 < projects.len() {
                admin.selected += 1;
            }
            AdminAction::None
        }
        KeyCode::Char('h' | ' ') => {
            let Some(project) = projects.get_mut(admin.selected) else {
                return AdminAction::None;
            };
            project.hidden = !project.hidden;
            admin.dirty = true;
            admin.status = None;
            tracing::debug!(id = %project.id, hidden = project.hidden, "project visibility toggled");
            AdminAction::Changed
        }
        KeyCode::Char('d') => {
            if let Some(project) = projects.get(admin.selected) {
                admin.status = Some(format!(
                    "Delete \"{}\"? Press y to confirm.",
                    project.name
                ));
                admin.pending_delete = Some(project.id.clone());
            }
            AdminAction::None
        }
        KeyCode::Char('s') => AdminAction::Save,
        KeyCode::Esc | KeyCode::Char('q') => AdminAction::Close,
        _ => AdminAction::None,
    }
}

/// Any key other than `y` cancels.
fn confirm_delete(
    admin: &mut AdminState,
    projects: &mut Vec<Project>,
    id: &str,
    key: KeyEvent,
) -> AdminAction {
    if key.code != KeyCode::Char('y') {
        admin.status = Some("Delete cancelled.".to_string());
        return AdminAction::None;
    }
    let Some(index) = projects.iter().position(|p| p.id == id) else {
        admin.status = None;
        return AdminAction::None;
    };

    let removed = projects.remove(index);
    admin.selected = admin.selected.min(projects.len().saturating_sub(1));
    admin.dirty = true;
    admin.status = Some(format!("Deleted \"{}\". Press s to save.", removed.name));
    tracing::debug!(id = %removed.id, "project deleted");
    AdminAction::Changed
}
