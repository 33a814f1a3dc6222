//! Async effect handlers. Each returns the event to feed back to the reducer.

use std::time::Duration;

use folio_core::projects::{Project, ProjectStore};
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::UiEvent;

/// Waits out the auto-close delay. Returns `None` when cancelled first.
pub async fn terminal_close_timer(
    task: TaskId,
    delay: Duration,
    cancel: CancellationToken,
) -> Option<UiEvent> {
    tokio::select! {
        () = cancel.cancelled() => None,
        () = tokio::time::sleep(delay) => Some(UiEvent::TerminalCloseElapsed { task }),
    }
}

/// Writes the project list on the blocking pool.
pub async fn save_projects(store: ProjectStore, task: TaskId, projects: Vec<Project>) -> UiEvent {
    let result = tokio::task::spawn_blocking(move || store.save(&projects))
        .await
        .map_err(|err| format!("save task failed: {err}"))
        .and_then(|saved| saved.map_err(|err| format!("{err:#}")));
    UiEvent::ProjectsSaved { task, result }
}
