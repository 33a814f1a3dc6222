//! Shared, UI-free building blocks for folio.
//!
//! - `config`: `$FOLIO_HOME/config.toml` loading and paths
//! - `projects` / `theme` / `media`: the JSON-backed content stores
//! - `secret`: admin secret redaction and verification
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod media;
pub mod projects;
pub mod secret;
pub mod theme;
