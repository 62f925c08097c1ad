use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const RAPIDAPI_KEY_ENV: &str = "RAPIDAPI_KEY";
const BACKEND_URL_ENV: &[&str] = &["API_URL", "NEXT_PUBLIC_API_URL"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

/// Upstream metadata provider (RapidAPI IMDb search).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default, alias = "apikey")]
    pub api_key: Option<String>,
    #[serde(default = "default_metadata_url", alias = "baseurl")]
    pub base_url: String,
    #[serde(default = "default_metadata_host")]
    pub host: String,
    #[serde(default = "default_query")]
    pub default_query: String,
    #[serde(default = "default_take")]
    pub default_take: usize,
    #[serde(default = "default_metadata_timeout")]
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_metadata_url(),
            host: default_metadata_host(),
            default_query: default_query(),
            default_take: default_take(),
            timeout_secs: default_metadata_timeout(),
        }
    }
}

/// Recommendation backend the query proxy forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_backend_url", alias = "baseurl")]
    pub base_url: String,
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl MetadataConfig {
    /// Outbound timeout. Zero would fail every call, so it means "default".
    pub fn timeout(&self) -> Duration {
        nonzero_secs(self.timeout_secs, default_metadata_timeout())
    }
}

impl RecommendationConfig {
    /// Outbound timeout. Zero would fail every call, so it means "default".
    pub fn timeout(&self) -> Duration {
        nonzero_secs(self.timeout_secs, default_backend_timeout())
    }
}

fn nonzero_secs(secs: u64, default: u64) -> Duration {
    Duration::from_secs(if secs == 0 { default } else { secs })
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_metadata_url() -> String {
    "https://imdb236.p.rapidapi.com".to_string()
}

fn default_metadata_host() -> String {
    "imdb236.p.rapidapi.com".to_string()
}

fn default_query() -> String {
    "popular".to_string()
}

fn default_take() -> usize {
    8
}

fn default_metadata_timeout() -> u64 {
    15
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_backend_timeout() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    /// Builds the process configuration: optional file first, then the
    /// environment on top of it.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(RAPIDAPI_KEY_ENV) {
            self.metadata.api_key = Some(key);
        }

        if let Some(url) = BACKEND_URL_ENV.iter().find_map(|k| get(*k)) {
            self.recommendations.base_url = url;
        }
    }

    /// Configured credential, with blank values treated as missing.
    pub fn metadata_api_key(&self) -> Option<&str> {
        self.metadata
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
