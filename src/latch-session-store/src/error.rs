//! Error types for latch-session-store.

use thiserror::Error;

/// Session store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error during slot file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// OS keychain failure.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Slot keys must be usable as a file name.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    /// Home directory not found.
    #[error("Could not determine home/data directory")]
    HomeDirNotFound,

    /// Failure injected by [`crate::MemorySlot`].
    #[error("Injected failure during {0}")]
    Injected(&'static str),
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoStorageAccess(_) => {
                StoreError::Keyring("Cannot access keyring storage".to_string())
            }
            keyring::Error::PlatformFailure(_) => {
                StoreError::Keyring("Platform-specific keyring failure".to_string())
            }
            _ => StoreError::Keyring(err.to_string()),
        }
    }
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
