//! Application state owned by the runtime and mutated only by the reducer.

use std::time::Duration;

use folio_core::projects::Project;
use folio_core::secret::SecretVerifier;
use folio_core::theme::Theme;

use crate::common::{TaskSeq, Tasks};
use crate::features::admin::AdminState;
use crate::features::gallery::GalleryState;
use crate::features::session::SessionState;
use crate::style::Palette;

pub struct AppState {
    pub should_quit: bool,
    pub gallery: GalleryState,
    pub session: SessionState,
    /// Present once a terminal login succeeded, until closed.
    pub admin: Option<AdminState>,
    pub palette: Palette,
    pub tasks: Tasks,
    pub task_seq: TaskSeq,
    pub verifier: Box<dyn SecretVerifier>,
}

impl AppState {
    pub fn new(
        projects: Vec<Project>,
        theme: Theme,
        welcome: Option<String>,
        close_delay: Duration,
        verifier: Box<dyn SecretVerifier>,
    ) -> Self {
        let palette = Palette::from_theme(&theme);
        Self {
            should_quit: false,
            gallery: GalleryState::new(projects, theme),
            session: SessionState::new(welcome, close_delay),
            admin: None,
            palette,
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            verifier,
        }
    }

    /// Reveals the admin surface. An already open surface keeps its state.
    pub fn open_admin_surface(&mut self) {
        self.admin.get_or_insert_with(AdminState::default);
    }
}
