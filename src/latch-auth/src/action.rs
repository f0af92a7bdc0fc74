//! Actions accepted by the auth state machine.

use latch_session_store::Account;

/// Everything the UI may ask of the auth state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login { email: String, password: String },
    Logout,
    Signup { name: String, email: String, password: String },
    /// Issued once at startup with whatever the session slot held.
    Restore(Option<Account>),
}

impl AuthAction {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        AuthAction::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn signup(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        AuthAction::Signup {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthAction::Login { .. } => "login",
            AuthAction::Logout => "logout",
            AuthAction::Signup { .. } => "signup",
            AuthAction::Restore(_) => "restore",
        }
    }
}

/// Persistence work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Overwrite the persisted session.
    Persist(Account),
    /// Delete the persisted session.
    Clear,
}

/// What a dispatched action amounted to, for the UI to react on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Account),
    /// An account with that email exists but the password was wrong.
    InvalidCredential,
    /// No account has that email. Reported silently.
    NoSuchAccount,
    SignedOut,
    Registered,
    Restored(Option<Account>),
}
