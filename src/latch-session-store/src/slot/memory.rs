//! Process-local session slot.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::SessionSlot;
use crate::error::{Result, StoreError};

/// An operation observed by a [`MemorySlot`], recorded whether or not it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOp {
    Write { key: String, value: String },
    Read { key: String },
    Delete { key: String },
}

/// Session slot kept in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
    ops: Mutex<Vec<SlotOp>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key`, as if written by an earlier run.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.values.lock().insert(key.into(), value.into());
        slot
    }

    /// Make subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent reads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deletes fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Current value under `key`, bypassing the op log.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Operations observed so far, oldest first.
    pub fn ops(&self) -> Vec<SlotOp> {
        self.ops.lock().clone()
    }
}

#[async_trait]
impl SessionSlot for MemorySlot {
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ops.lock().push(SlotOp::Write {
            key: key.to_string(),
            value: value.to_string(),
        });
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Injected("write"));
        }
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.ops.lock().push(SlotOp::Read {
            key: key.to_string(),
        });
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Injected("read"));
        }
        Ok(self.values.lock().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.ops.lock().push(SlotOp::Delete {
            key: key.to_string(),
        });
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Injected("delete"));
        }
        Ok(self.values.lock().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_records_ops_in_order() {
        let slot = MemorySlot::new();
        slot.write("k", "v").await.unwrap();
        assert_eq!(slot.read("k").await.unwrap(), Some("v".to_string()));
        assert!(slot.delete("k").await.unwrap());
        assert!(!slot.delete("k").await.unwrap());

        assert_eq!(
            slot.ops(),
            vec![
                SlotOp::Write {
                    key: "k".to_string(),
                    value: "v".to_string()
                },
                SlotOp::Read {
                    key: "k".to_string()
                },
                SlotOp::Delete {
                    key: "k".to_string()
                },
                SlotOp::Delete {
                    key: "k".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_injected_failures_leave_value_untouched() {
        let slot = MemorySlot::with_value("k", "old");
        slot.fail_writes(true);
        slot.fail_deletes(true);

        assert!(matches!(
            slot.write("k", "new").await,
            Err(StoreError::Injected("write"))
        ));
        assert!(matches!(
            slot.delete("k").await,
            Err(StoreError::Injected("delete"))
        ));
        assert_eq!(slot.peek("k"), Some("old".to_string()));

        slot.fail_reads(true);
        assert!(slot.read("k").await.is_err());
    }
}
