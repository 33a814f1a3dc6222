//! Interactive portfolio viewer (default command).

use anyhow::{Context, Result};
use folio_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let _enter = rt.enter();
    folio_tui::run_portfolio(config)
}
