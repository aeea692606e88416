use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::API_BASE_URL;
use crate::util::paths::config_path;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "JULES_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "No Jules API key configured. Pass --api-key, set JULES_API_KEY, or add api_key to {}",
        path.display()
    )]
    MissingApiKey { path: PathBuf },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Secret sent in the API key header on every request
    pub api_key: String,
    /// API endpoint; only overridden to point at a test server
    pub base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from ~/.jules/config.toml and the environment.
    ///
    /// API key precedence: `api_key_flag`, then `JULES_API_KEY`, then the file.
    pub fn load(api_key_flag: Option<String>) -> Result<Self, ConfigError> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::load_from(&config_path(), api_key_flag, env_key)
    }

    pub fn load_from(
        path: &Path,
        api_key_flag: Option<String>,
        env_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let toml_config = Self::read_file(path)?;

        let api_key = [api_key_flag, env_key, toml_config.api_key]
            .into_iter()
            .flatten()
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                path: path.to_path_buf(),
            })?;

        let mut config = Config::new(api_key);
        if let Some(base_url) = toml_config.base_url.filter(|url| !url.trim().is_empty()) {
            tracing::debug!(base_url = %base_url, "Using base URL from config file");
            config.base_url = base_url;
        }
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        if !path.exists() {
            return Ok(TomlConfig::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
