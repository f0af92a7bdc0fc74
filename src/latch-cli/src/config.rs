//! `config.toml` loading.
//!
//! Every field is optional; a missing file yields [`LatchConfig::default`].
//!
//! ```toml
//! backend = "keyring"
//! slot_key = "AAAA"
//! keyring_service = "latch"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use latch_session_store::{DEFAULT_KEYRING_SERVICE, DEFAULT_SLOT_KEY, SlotBackend};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML in '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatchConfig {
    /// Session storage backend.
    pub backend: SlotBackend,
    /// Key of the single session slot.
    pub slot_key: String,
    /// Keychain service name for the keyring backend.
    pub keyring_service: String,
    /// Default log level when neither `--log-level` nor the environment sets one.
    pub log_level: Option<String>,
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            backend: SlotBackend::default(),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            log_level: None,
        }
    }
}

impl LatchConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;

        debug!(path = %path.display(), backend = %config.backend, "Loaded config");
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.slot_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "slot_key",
                message: "must not be empty".to_string(),
            });
        }
        if self.keyring_service.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "keyring_service",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
