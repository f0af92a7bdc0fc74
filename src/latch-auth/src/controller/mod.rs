//! Owner of the session state.
//!
//! [`AuthController`] is the only writer: every change goes through
//! [`AuthController::dispatch`], which runs the pure transition, publishes the
//! result to every [`AuthHandle`] and queues the resulting persistence effect.

use latch_session_store::{Account, SessionDatabase, SessionPersistence};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::action::{AuthAction, AuthOutcome};
use crate::reducer::{outcome, side_effect, transition};
use crate::routing::{Screen, available_screens};
use crate::worker::PersistenceQueue;

/// Single writer of the session state.
#[derive(Debug)]
pub struct AuthController {
    state: watch::Sender<SessionDatabase>,
    queue: PersistenceQueue,
    restored: bool,
}

impl AuthController {
    /// Create a controller with an empty, anonymous state.
    ///
    /// Must be called inside a tokio runtime; the persistence worker is spawned here.
    pub fn new(persistence: SessionPersistence) -> Self {
        let (state, _) = watch::channel(SessionDatabase::new());
        Self {
            state,
            queue: PersistenceQueue::spawn(persistence),
            restored: false,
        }
    }

    /// A read-only view that follows every state change.
    pub fn handle(&self) -> AuthHandle {
        AuthHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionDatabase {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Apply `action` and queue its persistence effect without waiting for it.
    ///
    /// Only the first `Restore` is applied; later ones are ignored and report
    /// the current session.
    pub fn dispatch(&mut self, action: AuthAction) -> AuthOutcome {
        if let AuthAction::Restore(_) = action {
            if self.restored {
                warn!("Session already restored, ignoring Restore");
                return AuthOutcome::Restored(self.state.borrow().current_session.clone());
            }
            self.restored = true;
        }

        self.state
            .send_modify(|state| *state = transition(std::mem::take(state), &action));

        let (effect, outcome) = {
            let next = self.state.borrow();
            (side_effect(&action, &next), outcome(&action, &next))
        };

        debug!(action = action.kind(), outcome = ?outcome, "Auth action dispatched");
        if let Some(effect) = effect {
            self.queue.enqueue(effect);
        }
        outcome
    }

    pub fn login(&mut self, email: impl Into<String>, password: impl Into<String>) -> AuthOutcome {
        self.dispatch(AuthAction::login(email, password))
    }

    pub fn logout(&mut self) -> AuthOutcome {
        self.dispatch(AuthAction::Logout)
    }

    pub fn signup(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthOutcome {
        self.dispatch(AuthAction::signup(name, email, password))
    }

    /// Read the persisted session and dispatch the startup `Restore`.
    ///
    /// Runs once per controller, and not at all after a `Restore` was
    /// dispatched directly. Later calls log a warning and return the current
    /// session untouched.
    pub async fn bootstrap(&mut self) -> Option<Account> {
        if self.restored {
            warn!("Session already restored, ignoring repeated bootstrap");
            return self.state.borrow().current_session.clone();
        }

        let account = self.queue.load().await;
        match &account {
            Some(account) => info!(email = %account.email, "Restored persisted session"),
            None => debug!("No persisted session, starting signed out"),
        }
        self.dispatch(AuthAction::Restore(account.clone()));
        account
    }

    /// Whether a `Restore` has been applied.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Wait for every queued persistence effect to finish.
    pub async fn flush(&self) {
        self.queue.flush().await;
    }
}

/// Cloneable read access to the session state.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    rx: watch::Receiver<SessionDatabase>,
}

impl AuthHandle {
    pub fn snapshot(&self) -> SessionDatabase {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    pub fn current_session(&self) -> Option<Account> {
        self.rx.borrow().current_session.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.rx.borrow().last_error.clone()
    }

    /// Screens reachable in the current state.
    pub fn screens(&self) -> &'static [Screen] {
        available_screens(&self.rx.borrow())
    }

    /// Wait for the next state change. Returns `false` once the controller is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests;
