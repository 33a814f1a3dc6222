//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`;
//! the runtime calls `token.cancel()` on the provided token.

use std::time::Duration;

use folio_core::projects::Project;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Reveal the admin surface. Emitted once per successful authentication.
    OpenAdminSurface,

    /// Close the interactive terminal after `delay` unless `cancel` fires first.
    /// The runtime reports expiry with `UiEvent::TerminalCloseElapsed`.
    ScheduleTerminalClose {
        task: TaskId,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Select a project in the gallery and open its detail pane.
    ShowProject { id: String },

    /// Cancel an in-flight task.
    CancelTask { token: CancellationToken },

    /// Persist the project list.
    SaveProjects { task: TaskId, projects: Vec<Project> },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
