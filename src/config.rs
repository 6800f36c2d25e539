use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_model: Option<String>,
    pub default_lang: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    /// Load config from ~/.config/vidnotes/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content).unwrap_or_else(|e| {
                debug!("Ignoring invalid config: {e}");
                Config::default()
            });
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("vidnotes")
        .join("config.toml")
}
