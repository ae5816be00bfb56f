//! Configuration loading and management for wikisum.
//!
//! Loads settings from `wikisum.toml` with environment variable overrides.
//! Every setting has a default, so running without a config file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "wikisum.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Prefix joined with a bare page title to build the article URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Summary extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

/// Output location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory summary files are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default location (wikisum.toml in cwd or home),
    /// falling back to defaults when neither exists
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read(&path)?,
            None => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_env();
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "fetch.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Override settings from environment variables
    fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("WIKISUM_BASE_URL") {
            self.fetch.base_url = base_url;
        }
        if let Some(max_words) = std::env::var("WIKISUM_MAX_WORDS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            self.summary.max_words = max_words;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("wikisum")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }
}

fn default_base_url() -> String {
    "https://en.wikipedia.org/wiki/".to_string()
}

fn default_timeout_secs() -> u64 {
    crate::fetch::REQUEST_TIMEOUT.as_secs()
}

fn default_max_words() -> usize {
    crate::extract::DEFAULT_MAX_WORDS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}
