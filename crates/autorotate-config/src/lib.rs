mod types;

pub use types::*;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Returns the config directory: $XDG_CONFIG_HOME/autorotate/
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("autorotate");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the config file path: $XDG_CONFIG_HOME/autorotate/config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from the default location, or return defaults if not found.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path()?)
}

/// Load config from `path`, or return defaults if the file does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        info!(?path, "Loaded config");
        Ok(config)
    } else {
        info!(?path, "No config found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Save config to the default location.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    info!(?path, "Saved config");
    Ok(())
}

impl AppConfig {
    /// Normalize and check values that the daemon cannot run with.
    pub fn validate(&mut self) -> Result<()> {
        if self.engine.tick_interval_ms == 0 {
            bail!("engine.tick_interval_ms must be greater than zero");
        }
        if self
            .display
            .orientation_cmd
            .as_deref()
            .is_some_and(|cmd| cmd.trim().is_empty())
        {
            self.display.orientation_cmd = None;
        }
        if self
            .display
            .touch_device
            .as_deref()
            .is_some_and(|dev| dev.trim().is_empty())
        {
            bail!("display.touch_device must not be empty");
        }
        Ok(())
    }
}
