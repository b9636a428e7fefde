//! TOML configuration for the governance API connection.
//!
//! The config file lives under the platform config directory
//! (`~/.config/sync-mapper/config.toml` on Linux, `~/.sync-mapper` elsewhere)
//! and holds the API base URL and access token used by the CLI.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api: Option<ApiConfig>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("sync-mapper")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".sync-mapper")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// API connection settings, or an error telling the user how to fix it
    pub fn api(&self) -> Result<&ApiConfig> {
        self.api
            .as_ref()
            .context("No [api] section in config; set base_url and token in the config file")
    }
}
