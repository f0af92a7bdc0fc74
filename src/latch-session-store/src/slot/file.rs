//! File-backed session slot.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temp file in the same
//! directory and are renamed into place so readers never see partial content.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::SessionSlot;
use crate::error::{Result, StoreError};

/// Session slot stored as plain JSON files.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SessionSlot for FileSlot {
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        atomic_write(&path, value.as_bytes()).await?;
        debug!(path = %path.display(), "Session slot written");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Session slot deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write to a temp file next to `path`, then rename it over `path`.
async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Cannot determine parent directory",
        )
    })?;

    fs::create_dir_all(parent).await?;

    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("slot"),
        std::process::id()
    ));

    let mut file = create_private(&temp_path).await?;
    {
        use tokio::io::AsyncWriteExt;
        file.write_all(content).await?;
        file.flush().await?;
    }
    file.sync_all().await?;
    drop(file);

    // Windows refuses to rename over an existing file.
    #[cfg(windows)]
    {
        if path.exists() {
            let _ = fs::remove_file(path).await;
        }
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    Ok(())
}

/// Create or truncate `path`, owner read/write only from the first byte.
async fn create_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let file = options.open(path).await?;

    // `mode` only applies to newly created files.
    set_file_permissions(path)?;
    Ok(file)
}

/// Set restrictive file permissions (0600 on Unix).
fn set_file_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}
