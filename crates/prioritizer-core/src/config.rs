//! Client configuration (TOML).
//!
//! ```toml
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 30
//! max_url_length = 8000
//! default_strategy = "smart_balance"
//! import_mode = "lenient"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::ImportMode;
use crate::domain::Strategy;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MAX_URL_LENGTH: usize = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    /// No timeout of our own unless set; the transport decides.
    pub timeout_secs: Option<u64>,
    /// Ceiling for address-encoded (suggest) requests.
    pub max_url_length: Option<usize>,
    pub default_strategy: Strategy,
    pub import_mode: ImportMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            max_url_length: Some(DEFAULT_MAX_URL_LENGTH),
            default_strategy: Strategy::default(),
            import_mode: ImportMode::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
