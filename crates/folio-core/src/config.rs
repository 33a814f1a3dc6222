//! Configuration management for folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::secret::SecretString;

/// Environment variable that overrides `[admin] secret`.
pub const ADMIN_SECRET_ENV: &str = "FOLIO_ADMIN_SECRET";

pub mod paths {
    //! Path resolution for folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)
    //! 3. ./.folio when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the folio home directory.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".folio"),
            |h| h.join(".config").join("folio"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the default data directory.
    pub fn default_data_dir() -> PathBuf {
        folio_home().join("data")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Interactive terminal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Delay before auto-closing after a successful admin login (0 = immediate).
    pub close_delay_ms: u64,
    /// Canonical welcome line shown on open and after `clear`.
    pub welcome_message: Option<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: Config::DEFAULT_CLOSE_DELAY_MS,
            welcome_message: None,
        }
    }
}

/// Admin surface settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Password for the `admin` terminal command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretString>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when FOLIO_LOG is not set.
    pub level: String,
    /// Whether to write to $FOLIO_HOME/logs/folio.log.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Config::DEFAULT_LOG_LEVEL.to_string(),
            file: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding projects.json, theme.json and media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    #[serde(default)]
    pub terminal: TerminalConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    const DEFAULT_CLOSE_DELAY_MS: u64 = 1000;
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => paths::default_data_dir(),
        }
    }

    pub fn projects_path(&self) -> PathBuf {
        self.data_dir().join("projects.json")
    }

    pub fn theme_path(&self) -> PathBuf {
        self.data_dir().join("theme.json")
    }

    pub fn media_dir(&self) -> PathBuf {
        self.data_dir().join("projects")
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.terminal.close_delay_ms)
    }

    /// Returns the configured admin secret.
    ///
    /// `FOLIO_ADMIN_SECRET` wins over the config file. Blank values count as
    /// unconfigured.
    pub fn admin_secret(&self) -> Option<SecretString> {
        let from_env = std::env::var(ADMIN_SECRET_ENV).ok().map(SecretString::new);
        Self::resolve_secret(from_env, self.admin.secret.clone())
    }

    fn resolve_secret(
        from_env: Option<SecretString>,
        from_file: Option<SecretString>,
    ) -> Option<SecretString> {
        from_env
            .filter(|s| !s.is_blank())
            .or_else(|| from_file.filter(|s| !s.is_blank()))
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    ///
    /// # Errors
    /// Returns an error if the template or the generated values fail to parse.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.terminal.close_delay_ms, 1000);
        assert!(config.admin.secret.is_none());
        assert!(config.terminal.welcome_message.is_none());
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[terminal]\nclose_delay_ms = 250\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.close_delay(), Duration::from_millis(250));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file);
    }

    #[test]
    fn test_load_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[terminal\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("close_delay_ms = 1000"));
        assert!(contents.contains("# secret ="));

        let config = Config::load_from(&config_path).unwrap();
        assert!(config.admin.secret.is_none());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_generate_keeps_comments_and_defaults() {
        let generated = Config::generate().unwrap();
        assert!(generated.contains("# Password for the `admin` terminal command"));
        assert!(generated.contains("level = \"info\""));

        let parsed: Config = toml::from_str(&generated).unwrap();
        assert_eq!(parsed.terminal.close_delay_ms, 1000);
    }

    #[test]
    fn test_secret_loaded_from_file_and_redacted_in_debug() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[admin]\nsecret = \"hunter2\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        let secret = config.admin.secret.clone().unwrap();
        assert_eq!(secret.expose(), "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_env_secret_wins_and_blank_is_unconfigured() {
        let file = Some(SecretString::new("from-file"));

        let resolved = Config::resolve_secret(Some(SecretString::new("from-env")), file.clone());
        assert_eq!(resolved.unwrap().expose(), "from-env");

        let resolved = Config::resolve_secret(Some(SecretString::new("  ")), file);
        assert_eq!(resolved.unwrap().expose(), "from-file");

        assert!(Config::resolve_secret(None, Some(SecretString::new(""))).is_none());
    }

    #[test]
    fn test_data_paths_follow_data_dir() {
        let config = Config {
            data_dir: Some("/srv/folio".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.projects_path(),
            PathBuf::from("/srv/folio/projects.json")
        );
        assert_eq!(config.theme_path(), PathBuf::from("/srv/folio/theme.json"));
        assert_eq!(config.media_dir(), PathBuf::from("/srv/folio/projects"));
    }
}
