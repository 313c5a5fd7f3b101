use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. The DATABASE_URL environment
    /// variable takes precedence over this value.
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Per-feed HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Feeds fetched in parallel during a sync run
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, falling back to
    /// defaults, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config: AppConfig = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.database.url = Some(url);
            }
        }

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedsync")
            .join("config.toml")
    }

    /// The configured connection string. A missing value is fatal at
    /// startup, before any source is processed.
    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "database url not configured; set DATABASE_URL or [database] url in config.toml"
                        .to_string(),
                )
            })
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_concurrency() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_a_config_error() {
        let config = AppConfig::default();

        let err = config.database_url().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_database_url_is_a_config_error() {
        let mut config = AppConfig::default();
        config.database.url = Some(String::new());

        assert!(config.database_url().is_err());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/feedsync"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url().unwrap(), "postgres://localhost/feedsync");
        assert_eq!(config.sync.request_timeout_secs, 10);
        assert_eq!(config.sync.concurrency, 8);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn sync_section_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            [sync]
            request_timeout_secs = 30
            concurrency = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.sync.request_timeout_secs, 30);
        assert_eq!(config.sync.concurrency, 2);
    }
}
