//! Configuration management for zygote.
//!
//! Settings are stored as TOML under the XDG config directory and filled
//! with defaults for any missing key.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings};
pub use xdg::{get_config_dir, get_data_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const TAB_WIDTH: usize = 8;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
    pub const EVENT_POLL_INTERVAL_MS: u64 = 250;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates the file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is created with defaults. A file lacking some keys is
    /// rewritten with those keys filled in.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::validate_content(&original_content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Default log file location
    pub fn default_log_path() -> PathBuf {
        get_data_dir()
            .unwrap_or_else(|_| std::env::temp_dir())
            .join("zygote.log")
    }

    /// Parse config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zygote").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.tab_width, defaults::TAB_WIDTH);
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("tab_width = 8"));
    }

    #[test]
    fn test_missing_keys_are_filled_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\ntab_width = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.tab_width, 4);
        assert_eq!(config.logging.min_level, defaults::MIN_LOG_LEVEL);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[logging]"));
        assert!(written.contains("tab_width = 4"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor\ntab_width = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.editor.tab_width = 2;
        config.logging.file_path = Some("/tmp/z.log".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.editor.tab_width, 2);
        assert_eq!(loaded.logging.file_path.as_deref(), Some("/tmp/z.log"));
    }
}
