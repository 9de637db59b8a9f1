//! Configuration management
//!
//! Loads configuration from XDG-compliant paths or an explicit file.
//! Config location: ~/.config/randonaut/config.toml
//!
//! A missing default file means built-in defaults; nothing is ever written.

pub mod defaults;

use crate::coord::kde::Bandwidth;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for the command line
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Density estimation settings
    #[serde(default)]
    pub kde: KdeConfig,

    /// QRNG request settings
    #[serde(default)]
    pub qrng: QrngConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default QRNG backend
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Default search radius in meters
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Default number of random samples
    #[serde(default = "default_points")]
    pub points: usize,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Density estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdeConfig {
    /// Nodes per axis of the evaluation grid
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution: usize,

    /// Bandwidth rule: "silverman" or "scott"
    #[serde(default = "default_bandwidth")]
    pub bandwidth: String,

    /// Bits of precision taken from each raw sample
    #[serde(default = "default_precision_bits")]
    pub precision_bits: u32,
}

/// QRNG request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrngConfig {
    /// Timeout for each request in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for a failed batch (0 disables retrying)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds, doubled per retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// ANU QRNG API key
    #[serde(default)]
    pub anu: String,
}

// Default value functions for serde
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_radius() -> u32 {
    DEFAULT_RADIUS
}
fn default_points() -> usize {
    DEFAULT_POINTS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_grid_resolution() -> usize {
    DEFAULT_GRID_RESOLUTION
}
fn default_bandwidth() -> String {
    DEFAULT_BANDWIDTH.to_string()
}
fn default_precision_bits() -> u32 {
    DEFAULT_PRECISION_BITS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
fn default_retry_backoff_ms() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            radius: default_radius(),
            points: default_points(),
            format: default_format(),
        }
    }
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self {
            grid_resolution: default_grid_resolution(),
            bandwidth: default_bandwidth(),
            precision_bits: default_precision_bits(),
        }
    }
}

impl Default for QrngConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Falls back to defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_GRID_RESOLUTION).contains(&self.kde.grid_resolution) {
            return Err(Error::Config(format!(
                "kde.grid_resolution must be between 2 and {}, got {}",
                MAX_GRID_RESOLUTION, self.kde.grid_resolution
            )));
        }
        if !(1..=MAX_PRECISION_BITS).contains(&self.kde.precision_bits) {
            return Err(Error::Config(format!(
                "kde.precision_bits must be between 1 and {}, got {}",
                MAX_PRECISION_BITS, self.kde.precision_bits
            )));
        }
        self.bandwidth()?;
        Ok(())
    }

    /// Parsed bandwidth rule
    pub fn bandwidth(&self) -> Result<Bandwidth> {
        self.kde.bandwidth.parse().map_err(Error::Config)
    }

    /// Timeout applied to each QRNG request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.qrng.timeout_secs)
    }

    /// ANU API key, if one is configured
    pub fn anu_api_key(&self) -> Option<&str> {
        Some(self.api_keys.anu.as_str()).filter(|key| !key.is_empty())
    }
}
