//! Configuration and cache directory paths
//!
//! Platform-specific locations:
//! - Linux: `~/.config/robot-console/`, `~/.cache/robot-console/`
//! - macOS: `~/Library/Application Support/robot-console/`, `~/Library/Caches/robot-console/`
//! - Windows: `%APPDATA%\robot-console\`, `%LOCALAPPDATA%\robot-console\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "robot-console";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
///
/// Release builds write their log files here.
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Path of the config file in the platform config directory
///
/// Does not create anything; the file may not exist.
pub fn app_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join("config.toml"))
}
