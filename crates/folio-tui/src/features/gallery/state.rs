use folio_core::projects::{self, Project};
use folio_core::theme::Theme;

#[derive(Debug)]
pub struct GalleryState {
    /// The project directory, in display order. Shared with `ls` and admin.
    pub projects: Vec<Project>,
    pub theme: Theme,
    /// Index into the visible projects.
    pub selected: usize,
    pub detail_open: bool,
}

impl GalleryState {
    pub fn new(projects: Vec<Project>, theme: Theme) -> Self {
        Self {
            projects,
            theme,
            selected: 0,
            detail_open: false,
        }
    }

    /// Non-hidden projects in directory order.
    pub fn visible(&self) -> Vec<&Project> {
        projects::visible(&self.projects, false).collect()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible().get(self.selected).copied()
    }

    /// Selects the visible project with `id` and opens its detail pane.
    /// Returns false when no visible project matches.
    pub fn show_project(&mut self, id: &str) -> bool {
        let Some(index) = self.visible().iter().position(|p| p.id == id) else {
            return false;
        };
        self.selected = index;
        self.detail_open = true;
        true
    }

    /// Keeps the selection in range after the visible set changes.
    pub fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            self.selected = 0;
            self.detail_open = false;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}
