//! Typed access to the persisted session.
//!
//! Only the signed-in account is ever persisted; registered accounts live in
//! memory for the lifetime of the process.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::account::Account;
use crate::error::Result;
use crate::slot::SessionSlot;

/// Slot key used for the persisted session.
///
/// Matches the storage key of the mobile client so both read the same record.
pub const DEFAULT_SLOT_KEY: &str = "AAAA";

/// Serializes the current session into a single slot key.
#[derive(Clone)]
pub struct SessionPersistence {
    slot: Arc<dyn SessionSlot>,
    key: String,
}

impl SessionPersistence {
    pub fn new(slot: Arc<dyn SessionSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// Use [`DEFAULT_SLOT_KEY`].
    pub fn with_default_key(slot: Arc<dyn SessionSlot>) -> Self {
        Self::new(slot, DEFAULT_SLOT_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the persisted session with `account`.
    pub async fn save(&self, account: &Account) -> Result<()> {
        let json = serde_json::to_string(account)?;
        self.slot.write(&self.key, &json).await?;
        debug!(key = %self.key, email = %account.email, "Session persisted");
        Ok(())
    }

    /// Read the persisted session, reporting read and parse failures.
    pub async fn try_load(&self) -> Result<Option<Account>> {
        match self.slot.read(&self.key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Read the persisted session. Any failure counts as no session.
    pub async fn load(&self) -> Option<Account> {
        match self.try_load().await {
            Ok(account) => account,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not restore session, starting signed out");
                None
            }
        }
    }

    /// Remove the persisted session. Returns whether one existed.
    pub async fn clear(&self) -> Result<bool> {
        let deleted = self.slot.delete(&self.key).await?;
        debug!(key = %self.key, deleted, "Session slot cleared");
        Ok(deleted)
    }
}

impl std::fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::slot::{FileSlot, MemorySlot};
    use pretty_assertions::assert_eq;

    fn ada() -> Account {
        Account::new("Ada", "ada@example.com", "hunter22")
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let slot = Arc::new(MemorySlot::new());
        let persistence = SessionPersistence::with_default_key(slot.clone());

        persistence.save(&ada()).await.unwrap();
        assert_eq!(persistence.load().await, Some(ada()));

        let raw = slot.peek(DEFAULT_SLOT_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_load_empty_slot() {
        let persistence = SessionPersistence::with_default_key(Arc::new(MemorySlot::new()));
        assert_eq!(persistence.load().await, None);
    }

    #[tokio::test]
    async fn test_corrupt_record_loads_as_none() {
        let slot = Arc::new(MemorySlot::with_value(DEFAULT_SLOT_KEY, "{not json"));
        let persistence = SessionPersistence::with_default_key(slot);

        assert!(matches!(
            persistence.try_load().await,
            Err(StoreError::Json(_))
        ));
        assert_eq!(persistence.load().await, None);
    }

    #[tokio::test]
    async fn test_read_failure_loads_as_none() {
        let slot = Arc::new(MemorySlot::new());
        slot.fail_reads(true);
        let persistence = SessionPersistence::with_default_key(slot);
        assert_eq!(persistence.load().await, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let persistence =
            SessionPersistence::new(Arc::new(FileSlot::new(dir.path())), "session");

        assert!(!persistence.clear().await.unwrap());
        persistence.save(&ada()).await.unwrap();
        assert!(persistence.clear().await.unwrap());
        assert_eq!(persistence.load().await, None);
    }
}
