//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base URL, request timeout, and last used email.
//!
//! Configuration is stored at `~/.config/docshare/config.json`. The
//! `DOCSHARE_API_URL` and `DOCSHARE_TIMEOUT_SECS` environment variables
//! override the stored values.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "docshare";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const API_URL_ENV: &str = "DOCSHARE_API_URL";
const TIMEOUT_ENV: &str = "DOCSHARE_TIMEOUT_SECS";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub last_email: Option<String>,
}

/// Settings the HTTP client is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve client settings, letting the environment override the file.
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    fn client_config_with<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = env(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No API base URL configured (set {} or api_base_url)", API_URL_ENV)
            })?;

        let request_timeout_secs = match env(TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", TIMEOUT_ENV, raw))?,
            None => self
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(ClientConfig {
            api_base_url: api_base_url.trim().to_string(),
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_client_config_from_file() {
        let config = Config {
            api_base_url: Some("https://api.docshare.vn".to_string()),
            ..Default::default()
        };
        let client = config.client_config_with(env(&[])).expect("config");
        assert_eq!(client.api_base_url, "https://api.docshare.vn");
        assert_eq!(client.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config {
            api_base_url: Some("https://api.docshare.vn".to_string()),
            request_timeout_secs: Some(10),
            last_email: None,
        };
        let client = config
            .client_config_with(env(&[
                ("DOCSHARE_API_URL", "http://localhost:8080"),
                ("DOCSHARE_TIMEOUT_SECS", "5"),
            ]))
            .expect("config");
        assert_eq!(client.api_base_url, "http://localhost:8080");
        assert_eq!(client.request_timeout_secs, 5);
    }

    #[test]
    fn test_missing_base_url_is_error() {
        let config = Config::default();
        assert!(config.client_config_with(env(&[])).is_err());
        assert!(config
            .client_config_with(env(&[("DOCSHARE_API_URL", "  ")]))
            .is_err());
    }

    #[test]
    fn test_invalid_timeout_is_error() {
        let config = Config::default();
        let result = config.client_config_with(env(&[
            ("DOCSHARE_API_URL", "http://localhost:8080"),
            ("DOCSHARE_TIMEOUT_SECS", "soon"),
        ]));
        assert!(result.is_err());
    }
}
