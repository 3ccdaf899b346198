//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CYCLE_BAZAAR_API_URL` - Origin of the remote Cycle Bazaar API
//!
//! ## Optional
//! - `CYCLE_BAZAAR_STORAGE_PATH` - Path of the durable-storage JSON file
//!   (the terminal shell's stand-in for browser local storage)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the remote API, e.g. `https://api.cyclebazaar.example`.
    pub api_url: Url,
    /// Where the durable-storage file lives, when file-backed storage is
    /// used.
    pub storage_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CYCLE_BAZAAR_API_URL` is missing or not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = require_env("CYCLE_BAZAAR_API_URL")?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CYCLE_BAZAAR_API_URL".into(), e.to_string()))?;

        let storage_path = std::env::var("CYCLE_BAZAAR_STORAGE_PATH")
            .ok()
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            storage_path,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// Used by tests that point the client at a stub server.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            storage_path: None,
        }
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_the_url() {
        let url = Url::parse("http://127.0.0.1:9999").expect("valid url");
        let config = ClientConfig::new(url.clone());
        assert_eq!(config.api_url, url);
        assert!(config.storage_path.is_none());
    }
}
