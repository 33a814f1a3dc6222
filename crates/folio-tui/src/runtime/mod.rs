//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. Async handlers report back through the
//! inbox channel, which is drained once per loop iteration.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use folio_core::projects::ProjectStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    store: ProjectStore,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, store: ProjectStore) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the reducer asks to quit.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;
            if events.is_empty() && !dirty {
                continue;
            }

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            self.terminal.draw(|frame| render::render(&self.state, frame))?;
            dirty = false;
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            IDLE_POLL_DURATION.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= IDLE_POLL_DURATION {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and forwards its event, if any, to the inbox.
    fn spawn_effect<Fut>(&self, fut: Fut)
    where
        Fut: Future<Output = Option<UiEvent>> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = fut.await {
                let _ = tx.send(event);
            }
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        if update::apply_local_effect(&mut self.state, &effect) {
            return;
        }

        match effect {
            UiEffect::ScheduleTerminalClose {
                task,
                delay,
                cancel,
            } => {
                tracing::debug!(?task, ?delay, "terminal close scheduled");
                self.spawn_effect(handlers::terminal_close_timer(task, delay, cancel));
            }
            UiEffect::SaveProjects { task, projects } => {
                let store = self.store.clone();
                self.spawn_effect(async move {
                    Some(handlers::save_projects(store, task, projects).await)
                });
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(%url, error = %err, "failed to open browser");
                }
            }
            UiEffect::Quit
            | UiEffect::OpenAdminSurface
            | UiEffect::CancelTask { .. }
            | UiEffect::ShowProject { .. } => {}
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
