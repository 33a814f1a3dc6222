use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::transcript::Transcript;
use crate::common::{TaskId, TaskSeq};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Normal,
    /// `admin` was entered; the next submission is the credential.
    AwaitingCredential,
}

#[derive(Debug)]
pub(super) struct PendingClose {
    pub task: TaskId,
    pub cancel: CancellationToken,
}

/// State of the interactive terminal overlay.
#[derive(Debug)]
pub struct SessionState {
    pub open: bool,
    pub mode: SessionMode,
    pub transcript: Transcript,
    /// Line being typed; plaintext while awaiting a credential, masked on render.
    pub input: String,
    /// Transcript rows visible in the last frame.
    pub viewport_rows: usize,
    welcome: Option<String>,
    close_delay: Duration,
    pending_close: Option<PendingClose>,
    close_seq: TaskSeq,
}

impl SessionState {
    pub fn new(welcome: Option<String>, close_delay: Duration) -> Self {
        let welcome = welcome.filter(|m| !m.trim().is_empty());
        Self {
            open: false,
            mode: SessionMode::Normal,
            transcript: Transcript::new(welcome.as_deref()),
            input: String::new(),
            viewport_rows: 0,
            welcome,
            close_delay,
            pending_close: None,
            close_seq: TaskSeq::default(),
        }
    }

    pub fn welcome(&self) -> Option<&str> {
        self.welcome.as_deref()
    }

    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub fn is_awaiting_credential(&self) -> bool {
        self.mode == SessionMode::AwaitingCredential
    }

    /// Id of the scheduled auto-close, if any.
    pub fn pending_close(&self) -> Option<TaskId> {
        self.pending_close.as_ref().map(|p| p.task)
    }

    pub(super) fn schedule_close(&mut self) -> PendingClose {
        let task = self.close_seq.next_id();
        let cancel = CancellationToken::new();
        self.pending_close = Some(PendingClose {
            task,
            cancel: cancel.clone(),
        });
        PendingClose { task, cancel }
    }

    pub(super) fn take_pending_close(&mut self) -> Option<PendingClose> {
        self.pending_close.take()
    }

    /// Back to a fresh session: welcome-only transcript, Normal mode, empty input.
    pub(super) fn reset(&mut self) {
        self.mode = SessionMode::Normal;
        self.input.clear();
        self.transcript.reset(self.welcome.as_deref());
    }
}
