//! Full-screen portfolio viewer for folio.
//!
//! The gallery is the landing screen. `:` opens the interactive terminal,
//! whose `admin` login reveals the admin surface.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod style;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use folio_core::config::Config;
use folio_core::projects::ProjectStore;
use folio_core::secret::ConfiguredSecret;
use folio_core::theme::ThemeStore;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Loads the stores named by `config` and runs the viewer until quit.
///
/// Must be called from within a Tokio runtime; the auto-close timer and
/// project saves are spawned onto it.
///
/// # Errors
/// Returns an error if stdout is not a terminal, a store cannot be loaded, or
/// the terminal fails.
pub fn run_portfolio(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The portfolio viewer requires a terminal.\n\
             Use `folio projects list` for plain output."
        );
    }

    let store = ProjectStore::new(config.projects_path());
    let projects = store.load()?;
    let theme = ThemeStore::new(config.theme_path()).load()?;

    let verifier = ConfiguredSecret::new(config.admin_secret());
    if !verifier.is_configured() {
        tracing::warn!("no admin secret configured; admin login is disabled");
    }
    tracing::info!(
        projects = projects.len(),
        store = %store.path().display(),
        "starting portfolio viewer"
    );

    let state = AppState::new(
        projects,
        theme,
        config.terminal.welcome_message.clone(),
        config.close_delay(),
        Box::new(verifier),
    );
    let mut runtime = TuiRuntime::new(state, store)?;
    runtime.run()
}
