//! Durable key-value slots holding a serialized session.
//!
//! A slot stores at most one string value per key. Backends:
//!
//! - [`FileSlot`] - one JSON file per key, written atomically
//! - [`KeyringSlot`] - OS keychain entry per key
//! - [`MemorySlot`] - process-local map, with failure injection for tests

mod file;
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
mod keychain;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;

pub use file::FileSlot;
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub use keychain::KeyringSlot;
pub use memory::{MemorySlot, SlotOp};

/// Default keychain service name.
pub const DEFAULT_KEYRING_SERVICE: &str = "latch";

/// Persistence adapter contract.
#[async_trait]
pub trait SessionSlot: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`, `None` if the slot is empty.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Remove the value under `key`. Returns whether anything was removed.
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Backend selection for [`open_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl fmt::Display for SlotBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotBackend::File => write!(f, "file"),
            SlotBackend::Keyring => write!(f, "keyring"),
            SlotBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Where each backend keeps its data.
#[derive(Debug, Clone)]
pub struct SlotOptions {
    /// Directory for [`FileSlot`].
    pub session_dir: PathBuf,
    /// Service name for [`KeyringSlot`].
    pub keyring_service: String,
}

/// Open the slot for `backend`.
pub fn open_slot(backend: SlotBackend, options: &SlotOptions) -> Result<Arc<dyn SessionSlot>> {
    match backend {
        SlotBackend::File => Ok(Arc::new(FileSlot::new(options.session_dir.clone()))),
        #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
        SlotBackend::Keyring => Ok(Arc::new(KeyringSlot::with_service(
            options.keyring_service.clone(),
        ))),
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        SlotBackend::Keyring => Err(crate::error::StoreError::Keyring(
            "Keyring not supported on this platform".to_string(),
        )),
        SlotBackend::Memory => Ok(Arc::new(MemorySlot::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_file_slot() {
        let dir = tempfile::tempdir().unwrap();
        let options = SlotOptions {
            session_dir: dir.path().to_path_buf(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        };
        let slot = open_slot(SlotBackend::File, &options).unwrap();
        slot.write("k", "v").await.unwrap();
        assert_eq!(slot.read("k").await.unwrap(), Some("v".to_string()));
    }
}
