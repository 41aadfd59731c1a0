//! Configuration management for the banana client.
//!
//! Loads configuration from ${BANANA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the banana backend.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Config::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Matches the backend's local development default.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist. The `BANANA_BASE_URL`
    /// environment variable overrides the file value either way.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("BANANA_BASE_URL")
            && !url.trim().is_empty()
        {
            config.api_base_url = url.trim().to_string();
        }

        Ok(config)
    }
}

pub mod paths {
    //! Path resolution for banana configuration and session data.
    //!
    //! BANANA_HOME resolution order:
    //! 1. BANANA_HOME environment variable (if set)
    //! 2. ~/.config/banana (default)

    use std::path::PathBuf;

    /// Returns the banana home directory.
    ///
    /// Checks BANANA_HOME env var first, falls back to ~/.config/banana
    pub fn banana_home() -> PathBuf {
        if let Ok(home) = std::env::var("BANANA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("banana"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        banana_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        banana_home().join("session.json")
    }
}
