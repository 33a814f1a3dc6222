//! UI events consumed by the reducer.

use crossterm::event::Event;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic wake-up; triggers a render.
    Tick,
    /// Current terminal size, sent before each batch of events.
    Frame { width: u16, height: u16 },
    /// Raw crossterm input.
    Terminal(Event),
    /// A scheduled terminal close ran to completion.
    TerminalCloseElapsed { task: TaskId },
    /// A project save finished; the error is already rendered as text.
    ProjectsSaved {
        task: TaskId,
        result: Result<(), String>,
    },
}
