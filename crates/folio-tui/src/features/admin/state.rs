#[derive(Debug, Default)]
pub struct AdminState {
    /// Index into the full project list (hidden projects included).
    pub selected: usize,
    /// Unsaved visibility changes or deletions.
    pub dirty: bool,
    pub status: Option<String>,
    /// Project id awaiting delete confirmation.
    pub pending_delete: Option<String>,
}

impl AdminState {
    pub fn on_save_started(&mut self) {
        self.status = Some("Saving…".to_string());
    }

    pub fn on_saved(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.dirty = false;
                self.status = Some("Projects saved.".to_string());
            }
            Err(err) => self.status = Some(format!("Save failed: {err}")),
        }
    }
}
