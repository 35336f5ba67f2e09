//! Configuration file support for PumpPanel.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pumppanel/config.toml`.
//! Entity state (screening selections, pump state, medications) is
//! deliberately never persisted; the config file only carries the
//! device endpoint and display settings.

use crate::types::Locale;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Pump device endpoint configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Host (optionally `host:port`) of the pump on the local network.
    #[serde(default = "default_device_host")]
    pub host: String,

    /// Connect/read/write timeout for the fire-and-forget command, in
    /// milliseconds. Kept short so a dead device cannot wedge the shell.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl DeviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: default_device_host(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Display configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
}

// Default value functions
fn default_device_host() -> String {
    "192.168.4.1".into()
}

fn default_timeout_ms() -> u64 {
    1500
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("pumppanel").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
