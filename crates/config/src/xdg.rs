//! XDG Base Directory support for zygote.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "zygote";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/zygote` or `~/.config/zygote`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the data directory following XDG conventions.
///
/// Returns `$XDG_DATA_HOME/zygote` or `~/.local/share/zygote`.
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine data directory")
}
