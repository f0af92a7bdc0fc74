//! Keychain-backed session slot.
//!
//! - Windows: Credential Manager
//! - macOS: Keychain
//! - Linux: kernel keyutils
//!
//! The `keyring` calls are blocking, so each operation runs on the blocking pool.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{DEFAULT_KEYRING_SERVICE, SessionSlot};
use crate::error::{Result, StoreError};

/// Session slot stored in the OS keychain under `(service, key)`.
#[derive(Debug, Clone)]
pub struct KeyringSlot {
    service: String,
}

impl KeyringSlot {
    /// Create a keyring slot with the default service name.
    pub fn new() -> Self {
        Self::with_service(DEFAULT_KEYRING_SERVICE)
    }

    /// Create a keyring slot with a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    async fn with_entry<T, F>(&self, key: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(keyring::Entry) -> Result<T> + Send + 'static,
    {
        let service = self.service.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(&service, &key)?;
            op(entry)
        })
        .await
        .map_err(|e| StoreError::Keyring(format!("Keyring task failed: {e}")))?
    }
}

impl Default for KeyringSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionSlot for KeyringSlot {
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        let owned_key = key.to_string();
        self.with_entry(key, move |entry| {
            entry.set_password(&value).map_err(|e| {
                warn!("Failed to store session for key '{}': {}", owned_key, e);
                StoreError::from(e)
            })
        })
        .await?;
        debug!(service = %self.service, key, "Stored session in keyring");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_entry(key, |entry| match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let deleted = self
            .with_entry(key, |entry| match entry.delete_credential() {
                Ok(()) => Ok(true),
                Err(keyring::Error::NoEntry) => Ok(false),
                Err(e) => Err(StoreError::from(e)),
            })
            .await?;
        debug!(service = %self.service, key, deleted, "Deleted session from keyring");
        Ok(deleted)
    }
}
