//! Configuration schema
//!
//! Configuration is stored at `~/.config/findash/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Backend API settings
    pub api: ApiConfig,

    /// Response cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable response caching (default: true)
    pub enabled: bool,

    /// Default time-to-live for cached responses, in seconds
    pub ttl_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: crate::cache::DEFAULT_TTL_SECS,
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[api]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.cache.ttl_secs, 300);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [api]
            base_url = "https://api.example.com/"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.normalized_base_url(), "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 30); // default preserved
    }
}
