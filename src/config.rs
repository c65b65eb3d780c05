//! Configuration loading and management for abridge.
//!
//! Loads settings from `abridge.toml` with environment variable overrides for
//! deployment-specific values such as the service URL.

use crate::validate::TextLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "abridge.toml";
pub const BASE_URL_ENV: &str = "ABRIDGE_BASE_URL";
pub const TIMEOUT_ENV: &str = "ABRIDGE_TIMEOUT_MS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid text limits: min_chars {min} must be at most max_chars {max}, and max_chars must be positive")]
    InvalidLimits { min: usize, max: usize },
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Summarisation service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service; `/summarize` is appended to it
    pub base_url: String,
    /// Client-side request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Log file location for the terminal form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./abridge.log"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub limits: TextLimits,
    pub logging: LoggingConfig,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or from the standard
    /// locations (abridge.toml in cwd or home). Falls back to defaults when
    /// no file exists.
    ///
    /// Precedence: `base_url` (from the command line), then environment,
    /// then file. Validation runs once, after every override.
    pub fn load(explicit: Option<&Path>, base_url: Option<&str>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::find_config_file() {
                Some(path) => Self::load_from(&path)?,
                None => Self::default(),
            },
        };

        config.resolve(|key| std::env::var(key).ok(), base_url)
    }

    /// Apply environment and command-line overrides, then validate.
    pub fn resolve<F>(mut self, lookup: F, base_url: Option<&str>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_env_overrides(lookup)?;
        if let Some(url) = base_url {
            self.service.base_url = url.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Load configuration from a specific path, without environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Override service settings from environment variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.service.base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.service.timeout_ms = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(format!("{TIMEOUT_ENV}={raw}")))?;
        }
        Ok(())
    }

    /// Reject settings the form cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.service.base_url;
        match reqwest::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError::InvalidUrl {
                    url: url.clone(),
                    reason: format!("unsupported scheme {}", parsed.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigError::InvalidUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                })
            }
        }

        if self.service.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }

        let TextLimits {
            min_chars,
            max_chars,
        } = self.limits;
        if max_chars == 0 || min_chars > max_chars {
            return Err(ConfigError::InvalidLimits {
                min: min_chars,
                max: max_chars,
            });
        }

        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("abridge")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }
}
