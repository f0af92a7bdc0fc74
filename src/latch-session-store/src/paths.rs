//! OS-aware path detection for Latch storage.
//!
//! - **Windows**: `%APPDATA%\Latch\`
//! - **macOS**: `~/Library/Application Support/Latch/`
//! - **Linux**: `~/.local/share/Latch/`
//!
//! `LATCH_HOME` overrides the platform default.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Application name used for storage directories.
pub const APP_NAME: &str = "Latch";

/// Environment variable overriding the home directory.
pub const HOME_ENV_VAR: &str = "LATCH_HOME";

/// Subdirectory holding file-backed session slots.
pub const SESSION_DIR: &str = "session";

/// Configuration file name inside the home directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Latch storage paths container.
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Root directory.
    pub home: PathBuf,
    /// File slot directory.
    pub session_dir: PathBuf,
    /// `config.toml` location.
    pub config_file: PathBuf,
}

impl StorePaths {
    /// Create paths with automatic OS detection.
    pub fn new() -> Result<Self> {
        Ok(Self::from_root(latch_home()?))
    }

    /// Create paths from a custom root directory.
    pub fn from_root(home: PathBuf) -> Self {
        Self {
            session_dir: home.join(SESSION_DIR),
            config_file: home.join(CONFIG_FILE),
            home,
        }
    }

    /// Ensure the directories exist.
    pub async fn ensure_dirs(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.session_dir).await?;
        debug!(home = %self.home.display(), "Latch storage directories initialized");
        Ok(())
    }
}

/// Get the Latch home directory.
pub fn latch_home() -> Result<PathBuf> {
    if let Ok(val) = std::env::var(HOME_ENV_VAR) {
        if !val.is_empty() {
            let path = PathBuf::from(val);
            debug!(path = %path.display(), "Using LATCH_HOME override");
            return Ok(path);
        }
    }

    let base = dirs::data_dir().ok_or(StoreError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}
