//! Client configuration loaded from TOML and the environment.
//!
//! ```toml
//! base_url = "https://api.example.com"
//!
//! [default_options.headers]
//! Authorization = "Bearer ..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::FetchOptions;

/// Overrides `base_url` when set.
pub const BASE_URL_ENV: &str = "TYPED_FETCH_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("failed to parse config: {reason}")]
    ParseError { reason: String },
}

/// Base URL and default options for a [`crate::Client`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_options: FetchOptions,
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides.
    pub fn apply_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        self
    }
}
