//! Tracing subscriber setup.
//!
//! The TUI owns the screen, so interactive runs log to
//! `$FOLIO_HOME/logs/folio.log` through a non-blocking appender. One-shot CLI
//! commands log to stderr. `FOLIO_LOG` overrides the configured level using
//! the usual `EnvFilter` directive syntax.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, paths};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "FOLIO_LOG";

const LOG_FILE_NAME: &str = "folio.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to the log file (when enabled in config).
    File,
    /// Write to stderr.
    Stderr,
}

/// Builds the filter: `FOLIO_LOG` wins, then the configured level, then `info`.
pub fn build_filter(env_directives: Option<&str>, configured_level: &str) -> EnvFilter {
    env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| {
            let level = configured_level
                .trim()
                .parse::<LevelFilter>()
                .unwrap_or(LevelFilter::INFO);
            EnvFilter::default().add_directive(level.into())
        })
}

/// Installs the global subscriber.
///
/// Returns the appender guard for file logging; keep it alive until exit so
/// buffered lines are flushed. Returns `None` when nothing was installed or
/// the target needs no guard.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env.as_deref(), &config.level);

    match target {
        LogTarget::File if config.file => {
            let dir = paths::logs_dir();
            let guard = init_file(&dir, filter)?;
            Ok(Some(guard))
        }
        LogTarget::File => Ok(None),
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time();
            let _ = tracing_subscriber::registry()
                .with(layer.with_filter(filter))
                .try_init();
            Ok(None)
        }
    }
}

fn init_file(dir: &Path, filter: EnvFilter) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer().with_ansi(false).with_writer(writer);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directives_win() {
        let filter = build_filter(Some("debug"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_configured_level_used_without_env() {
        let filter = build_filter(None, "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = build_filter(Some("  "), "error");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let filter = build_filter(None, "loud");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
