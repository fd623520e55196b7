use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wealthgrabber_core::DEFAULT_BASE_CURRENCY;

pub const CONFIG_FILE: &str = "config.toml";

/// Settings read from `<data-dir>/config.toml`; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Currency assumed for records that carry none, and used to value positions
    pub base_currency: String,
    /// Activities per account when `--limit` is not given
    pub activity_limit: usize,
    /// Keyring service name under which sessions are stored
    pub keyring_service: String,
    /// Failed password attempts allowed before login gives up
    pub login_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            activity_limit: 50,
            keyring_service: "wealthgrabber".to_string(),
            login_attempts: 3,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
