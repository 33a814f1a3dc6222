//! Top-level reducer.
//!
//! Routes events to the feature slices and collects their effects. Key
//! presses go to the topmost surface: terminal, then admin, then gallery.

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use folio_core::projects::summaries;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::admin::{self, AdminAction};
use crate::features::gallery;
use crate::features::session::{self, SessionContext, SessionEvent};
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            app.session.viewport_rows = session::render::viewport_rows(width, height);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::TerminalCloseElapsed { task } => {
            session_event(app, SessionEvent::CloseElapsed(task))
        }
        UiEvent::ProjectsSaved { task, result } => {
            if app.tasks.projects_save.finish_if_active(task) {
                if let Err(err) = &result {
                    tracing::error!(error = %err, "saving projects failed");
                }
                if let Some(admin) = app.admin.as_mut() {
                    admin.on_saved(result);
                }
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Resize(width, height) => {
            app.session.viewport_rows = session::render::viewport_rows(width, height);
            vec![]
        }
        _ => vec![],
    }
}

/// Feeds one event to the terminal session with the current directory and clock.
fn session_event(app: &mut AppState, event: SessionEvent) -> Vec<UiEffect> {
    let directory = summaries(&app.gallery.projects);
    let ctx = SessionContext {
        projects: &directory,
        verifier: app.verifier.as_ref(),
        now: Local::now().fixed_offset(),
    };
    session::update::update(&mut app.session, event, &ctx)
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if app.session.open {
        let directory = summaries(&app.gallery.projects);
        let ctx = SessionContext {
            projects: &directory,
            verifier: app.verifier.as_ref(),
            now: Local::now().fixed_offset(),
        };
        return session::update::handle_key(&mut app.session, key, &ctx);
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    if let Some(admin_state) = app.admin.as_mut() {
        return match admin::update::handle_key(admin_state, &mut app.gallery.projects, key) {
            AdminAction::None => vec![],
            AdminAction::Changed => {
                app.gallery.clamp_selection();
                vec![]
            }
            AdminAction::Save => start_save(app),
            AdminAction::Close => {
                app.admin = None;
                vec![]
            }
        };
    }

    match key.code {
        KeyCode::Char(':' | '`') => session_event(app, SessionEvent::Open),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => gallery::update::handle_key(&mut app.gallery, key),
    }
}

fn start_save(app: &mut AppState) -> Vec<UiEffect> {
    let Some(admin) = app.admin.as_mut() else {
        return vec![];
    };
    if app.tasks.projects_save.is_running() {
        admin.status = Some("A save is already in progress.".to_string());
        return vec![];
    }
    let task = app.task_seq.next_id();
    app.tasks.projects_save.start(task);
    admin.on_save_started();
    vec![UiEffect::SaveProjects {
        task,
        projects: app.gallery.projects.clone(),
    }]
}

/// Effects the runtime applies to state directly, without spawning anything.
pub fn apply_local_effect(app: &mut AppState, effect: &UiEffect) -> bool {
    match effect {
        UiEffect::Quit => {
            app.should_quit = true;
            true
        }
        UiEffect::OpenAdminSurface => {
            app.open_admin_surface();
            true
        }
        UiEffect::ShowProject { id } => {
            app.gallery.show_project(id);
            true
        }
        UiEffect::CancelTask { token } => {
            token.cancel();
            true
        }
        _ => false,
    }
}
