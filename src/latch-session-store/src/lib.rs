//! Latch Session Store - account records and session persistence.
//!
//! Holds the in-memory [`SessionDatabase`] shape and persists the signed-in
//! account to a single durable slot:
//!
//! - [`FileSlot`] - JSON file under the Latch home directory
//! - [`KeyringSlot`] - OS keychain
//! - [`MemorySlot`] - in-process, for tests
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use latch_session_store::{Account, FileSlot, SessionPersistence, StorePaths};
//!
//! #[tokio::main]
//! async fn main() -> latch_session_store::Result<()> {
//!     let paths = StorePaths::new()?;
//!     paths.ensure_dirs().await?;
//!
//!     let persistence =
//!         SessionPersistence::with_default_key(Arc::new(FileSlot::new(paths.session_dir)));
//!     persistence.save(&Account::new("Ada", "ada@example.com", "hunter22")).await?;
//!
//!     let restored = persistence.load().await;
//!     println!("Restored: {:?}", restored.map(|a| a.email));
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod error;
pub mod paths;
pub mod persistence;
pub mod slot;

pub use account::{Account, SessionDatabase};
pub use error::{Result, StoreError};
pub use paths::{StorePaths, latch_home};
pub use persistence::{DEFAULT_SLOT_KEY, SessionPersistence};
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub use slot::KeyringSlot;
pub use slot::{
    DEFAULT_KEYRING_SERVICE, FileSlot, MemorySlot, SessionSlot, SlotBackend, SlotOp, SlotOptions,
    open_slot,
};
