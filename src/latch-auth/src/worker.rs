//! Background task applying session effects to the slot.
//!
//! Effects are queued without waiting and applied one at a time in the order
//! they were dispatched. Failures are logged and dropped.

use latch_session_store::{Account, SessionPersistence};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::action::SessionEffect;

enum PersistCommand {
    Apply(SessionEffect),
    Load(oneshot::Sender<Option<Account>>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the persistence worker task.
#[derive(Debug, Clone)]
pub struct PersistenceQueue {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistenceQueue {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(persistence: SessionPersistence) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(persistence, rx));
        Self { tx }
    }

    /// Queue `effect` without waiting for it.
    pub fn enqueue(&self, effect: SessionEffect) {
        if self.tx.send(PersistCommand::Apply(effect)).is_err() {
            warn!("Persistence worker stopped, dropping session effect");
        }
    }

    /// Read the persisted session after everything queued so far has been applied.
    pub async fn load(&self) -> Option<Account> {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(PersistCommand::Load(ack)).is_err() {
            warn!("Persistence worker stopped, treating session as absent");
            return None;
        }
        rx.await.unwrap_or(None)
    }

    /// Wait until everything queued so far has been applied.
    pub async fn flush(&self) {
        let (ack, rx) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(ack)).is_ok() {
            let _ = rx.await;
        }
    }
}

async fn run(persistence: SessionPersistence, mut rx: mpsc::UnboundedReceiver<PersistCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            PersistCommand::Apply(SessionEffect::Persist(account)) => {
                if let Err(e) = persistence.save(&account).await {
                    warn!(error = %e, "Failed to persist session");
                }
            }
            PersistCommand::Apply(SessionEffect::Clear) => {
                if let Err(e) = persistence.clear().await {
                    warn!(error = %e, "Failed to clear persisted session");
                }
            }
            PersistCommand::Load(reply) => {
                let _ = reply.send(persistence.load().await);
            }
            PersistCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Persistence worker finished");
}
