//! Theme command handlers.

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::theme::{ThemePatch, ThemeStore};
use tracing::info;

pub fn show(config: &Config) -> Result<()> {
    let theme = ThemeStore::new(config.theme_path())
        .load()
        .context("load theme")?;
    println!("{}", serde_json::to_string_pretty(&theme)?);
    println!();
    for (name, value) in theme.css_variables() {
        println!("{name}: {value};");
    }
    Ok(())
}

pub fn set(config: &Config, patch: ThemePatch) -> Result<()> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update; pass at least one field flag");
    }
    let store = ThemeStore::new(config.theme_path());
    let mut theme = store.load().context("load theme")?;
    theme.apply(patch)?;
    store.save(&theme)?;
    info!(path = %store.path().display(), "theme updated");
    println!("Theme saved to {}", store.path().display());
    Ok(())
}
