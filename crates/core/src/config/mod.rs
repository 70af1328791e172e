//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (APOD_*)
//! 2. TOML config file (the binary takes it from `--config` or APOD_CONFIG_FILE)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_DB_FILE_NAME;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (APOD_*)
/// 2. TOML config file
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// NASA API key sent with every APOD metadata request.
    ///
    /// Set via APOD_API_KEY environment variable.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Base URL of the APOD endpoint.
    ///
    /// Set via APOD_API_BASE_URL environment variable.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Image cache directory, used when none is given on the command line.
    ///
    /// Set via APOD_CACHE_DIR environment variable.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// File name of the SQLite index inside the cache directory.
    ///
    /// Set via APOD_DB_FILE_NAME environment variable.
    #[serde(default = "default_db_file_name")]
    pub db_file_name: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via APOD_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via APOD_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum image size to download, in bytes.
    ///
    /// Set via APOD_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_api_key() -> String {
    "DEMO_KEY".into()
}

fn default_api_base_url() -> String {
    "https://api.nasa.gov/planetary/apod".into()
}

fn default_db_file_name() -> String {
    DEFAULT_DB_FILE_NAME.into()
}

fn default_user_agent() -> String {
    "apod-wallpaper/0.1".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_bytes() -> usize {
    52_428_800 // 50MB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            api_base_url: default_api_base_url(),
            cache_dir: None,
            db_file_name: default_db_file_name(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Location of the index database for a given cache directory.
    pub fn db_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(&self.db_file_name)
    }

    /// Load configuration using an explicit TOML file.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `APOD_`
    /// 2. TOML file at `config_file` (if given)
    /// 3. Built-in defaults via `Default::default()`
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "merging configuration file");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed("APOD_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the cache directory, preferring an explicit override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither the override nor
    /// `cache_dir` is set.
    pub fn require_cache_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.cache_dir.clone())
            .ok_or_else(|| ConfigError::Missing {
                field: "cache_dir".into(),
                hint: "Pass CACHE_DIR on the command line or set APOD_CACHE_DIR".into(),
            })
    }
}
