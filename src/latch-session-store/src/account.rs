//! Account records and the in-memory session database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered account.
///
/// Credentials are kept in plaintext; this type only guards against
/// accidentally printing the password through `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Case-insensitive email comparison.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Exact password comparison.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// In-memory state shared by the auth controller and its readers.
///
/// `current_session`, when present, equals one of `records` by value, or was
/// restored from the session slot without being registered in this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDatabase {
    /// Accounts registered during this run, in registration order.
    pub records: Vec<Account>,
    /// The signed-in account.
    pub current_session: Option<Account>,
    /// Set only by a login whose email matched but whose password did not.
    pub last_error: Option<String>,
}

impl SessionDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session.is_some()
    }
}
