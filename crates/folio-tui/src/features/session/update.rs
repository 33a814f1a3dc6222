//! Terminal session reducer.
//!
//! `update` is the whole state machine: it mutates [`SessionState`] and returns
//! effects for the runtime. Nothing here touches the clock, the terminal or
//! the filesystem; the caller supplies `now`, the project directory and the
//! verifier through [`SessionContext`].

use chrono::{DateTime, FixedOffset};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::projects::ProjectSummary;
use folio_core::secret::SecretVerifier;
use tracing::{debug, info, warn};

use super::command::{self, AUTH_FAILURE, AUTH_SUCCESS, Command, PASSWORD_PROMPT};
use super::render;
use super::state::{SessionMode, SessionState};
use super::transcript::{Entry, OutputLine};
use crate::common::TaskId;
use crate::effects::UiEffect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Open,
    Close,
    /// A line submitted with Enter.
    Submit(String),
    /// Abandon a pending credential prompt.
    Cancel,
    /// The auto-close scheduled after a successful login fired.
    CloseElapsed(TaskId),
    /// Follow a project link: close the terminal and show the project.
    OpenLink(String),
}

/// Read-only inputs for one reducer step.
pub struct SessionContext<'a> {
    pub projects: &'a [ProjectSummary],
    pub verifier: &'a dyn SecretVerifier,
    pub now: DateTime<FixedOffset>,
}

pub fn update(
    state: &mut SessionState,
    event: SessionEvent,
    ctx: &SessionContext<'_>,
) -> Vec<UiEffect> {
    match event {
        SessionEvent::Open => open(state),
        SessionEvent::Close => close(state),
        SessionEvent::Submit(line) => {
            if !state.open {
                return vec![];
            }
            match state.mode {
                SessionMode::Normal => {
                    dispatch(state, &line, ctx);
                    vec![]
                }
                SessionMode::AwaitingCredential => authenticate(state, &line, ctx),
            }
        }
        SessionEvent::Cancel => {
            if state.is_awaiting_credential() {
                state.mode = SessionMode::Normal;
                state
                    .transcript
                    .push(Entry::command(String::new(), vec![OutputLine::text("^C")]));
            }
            vec![]
        }
        SessionEvent::OpenLink(id) => {
            // Hidden projects have no gallery card to show.
            let visible = ctx.projects.iter().any(|p| p.id == id && !p.hidden);
            if !state.open || !visible {
                return vec![];
            }
            debug!(%id, "following project link");
            let mut effects = close(state);
            effects.push(UiEffect::ShowProject { id });
            effects
        }
        SessionEvent::CloseElapsed(task) => {
            if state.pending_close() == Some(task) {
                state.take_pending_close();
                state.open = false;
                debug!("terminal auto-closed");
            }
            vec![]
        }
    }
}

fn open(state: &mut SessionState) -> Vec<UiEffect> {
    let effects = cancel_pending_close(state);
    state.reset();
    state.open = true;
    effects
}

fn close(state: &mut SessionState) -> Vec<UiEffect> {
    let effects = cancel_pending_close(state);
    state.open = false;
    state.mode = SessionMode::Normal;
    state.input.clear();
    effects
}

fn cancel_pending_close(state: &mut SessionState) -> Vec<UiEffect> {
    state
        .take_pending_close()
        .map(|pending| UiEffect::CancelTask {
            token: pending.cancel,
        })
        .into_iter()
        .collect()
}

/// Runs a Normal-mode line. Appends exactly one entry, except for `clear`.
fn dispatch(state: &mut SessionState, line: &str, ctx: &SessionContext<'_>) {
    let output = match command::parse(line) {
        Command::Empty => {
            state.transcript.push(Entry::blank());
            return;
        }
        Command::Clear => {
            state.reset();
            return;
        }
        Command::Admin => {
            state.mode = SessionMode::AwaitingCredential;
            vec![OutputLine::text(PASSWORD_PROMPT)]
        }
        Command::Help => command::help_lines(),
        Command::Date => vec![OutputLine::Text(command::format_date(&ctx.now))],
        Command::Echo(text) => vec![OutputLine::text(text)],
        Command::Ls { all } => command::ls_lines(ctx.projects, all),
        Command::LsUsage(arg) => command::ls_usage_lines(arg),
        Command::Unknown => vec![OutputLine::Text(format!("command not found: {line}"))],
    };
    state.transcript.push(Entry::command(line, output));
}

/// Verifies the credential and drops the plaintext. Never re-dispatches it.
fn authenticate(
    state: &mut SessionState,
    candidate: &str,
    ctx: &SessionContext<'_>,
) -> Vec<UiEffect> {
    state.mode = SessionMode::Normal;

    if !ctx.verifier.verify(candidate) {
        warn!("admin authentication failed");
        state
            .transcript
            .push(Entry::credential(candidate, vec![OutputLine::text(AUTH_FAILURE)]));
        return vec![];
    }

    info!("admin authentication succeeded");
    state
        .transcript
        .push(Entry::credential(candidate, vec![OutputLine::text(AUTH_SUCCESS)]));

    let mut effects = vec![UiEffect::OpenAdminSurface];
    let delay = state.close_delay();
    if delay.is_zero() {
        effects.extend(close(state));
    } else {
        let pending = state.schedule_close();
        effects.push(UiEffect::ScheduleTerminalClose {
            task: pending.task,
            delay,
            cancel: pending.cancel,
        });
    }
    effects
}

/// Maps a key press to a session event (or a local edit).
pub fn handle_key(
    state: &mut SessionState,
    key: KeyEvent,
    ctx: &SessionContext<'_>,
) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {
            if state.input.is_empty()
                && let Some(id) = state.transcript.focused_link()
            {
                let id = id.to_string();
                return update(state, SessionEvent::OpenLink(id), ctx);
            }
            let line = std::mem::take(&mut state.input);
            update(state, SessionEvent::Submit(line), ctx)
        }
        KeyCode::Tab if !state.is_awaiting_credential() => {
            state.transcript.focus_next_link();
            vec![]
        }
        KeyCode::BackTab if !state.is_awaiting_credential() => {
            state.transcript.focus_prev_link();
            vec![]
        }
        KeyCode::Esc => {
            let event = if state.is_awaiting_credential() {
                state.input.clear();
                SessionEvent::Cancel
            } else {
                SessionEvent::Close
            };
            update(state, event, ctx)
        }
        KeyCode::Char('c') if ctrl => {
            state.input.clear();
            if state.is_awaiting_credential() {
                update(state, SessionEvent::Cancel, ctx)
            } else {
                vec![]
            }
        }
        KeyCode::Char('u') if ctrl => {
            state.input.clear();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            state.transcript.clear_link_focus();
            state.input.push(c);
            vec![]
        }
        KeyCode::Backspace => {
            state.transcript.clear_link_focus();
            state.input.pop();
            vec![]
        }
        KeyCode::PageUp => {
            let total = render::line_count(&state.transcript);
            let page = state.viewport_rows.saturating_sub(1).max(1);
            state
                .transcript
                .scroll_up(page, total, state.viewport_rows);
            vec![]
        }
        KeyCode::PageDown => {
            let total = render::line_count(&state.transcript);
            let page = state.viewport_rows.saturating_sub(1).max(1);
            state
                .transcript
                .scroll_down(page, total, state.viewport_rows);
            vec![]
        }
        _ => vec![],
    }
}
