//! CLI command handlers.

pub mod config;
pub mod media;
pub mod portfolio;
pub mod projects;
pub mod theme;
