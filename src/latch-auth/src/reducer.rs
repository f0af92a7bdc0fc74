//! Pure transition function over [`SessionDatabase`].
//!
//! [`transition`] never fails and never touches storage. The persistence work
//! implied by a transition is derived separately by [`side_effect`] and is the
//! caller's job to carry out.

use latch_session_store::{Account, SessionDatabase};

use crate::action::{AuthAction, AuthOutcome, SessionEffect};

/// Message stored in `last_error` when the email matched but the password did not.
pub const INVALID_CREDENTIAL: &str = "Invalid credential.";

/// Compute the next state for `action`.
pub fn transition(state: SessionDatabase, action: &AuthAction) -> SessionDatabase {
    match action {
        AuthAction::Login { email, password } => {
            let (matched, last_error) = scan_credentials(&state.records, email, password);
            SessionDatabase {
                records: state.records,
                current_session: matched,
                last_error,
            }
        }
        AuthAction::Logout => SessionDatabase {
            records: state.records,
            current_session: None,
            last_error: None,
        },
        AuthAction::Signup {
            name,
            email,
            password,
        } => {
            let mut records = state.records;
            records.push(Account::new(name.as_str(), email.as_str(), password.as_str()));
            SessionDatabase {
                records,
                current_session: None,
                last_error: None,
            }
        }
        AuthAction::Restore(account) => SessionDatabase {
            records: state.records,
            current_session: account.clone(),
            last_error: None,
        },
    }
}

/// Walk every record with a matching email. Later records overwrite both the
/// match and the error from earlier ones, so with duplicate emails the last
/// registered account decides the outcome.
fn scan_credentials(
    records: &[Account],
    email: &str,
    password: &str,
) -> (Option<Account>, Option<String>) {
    let mut matched = None;
    let mut error = None;

    for record in records.iter().filter(|r| r.email_matches(email)) {
        if record.password_matches(password) {
            matched = Some(record.clone());
        } else {
            error = Some(INVALID_CREDENTIAL.to_string());
        }
    }

    (matched, error)
}

/// Persistence work to perform after `action` produced `next`.
pub fn side_effect(action: &AuthAction, next: &SessionDatabase) -> Option<SessionEffect> {
    match action {
        AuthAction::Login { .. } => next.current_session.clone().map(SessionEffect::Persist),
        AuthAction::Logout => Some(SessionEffect::Clear),
        AuthAction::Signup { .. } | AuthAction::Restore(_) => None,
    }
}

/// Summarize how `action` left `next`.
pub fn outcome(action: &AuthAction, next: &SessionDatabase) -> AuthOutcome {
    match action {
        AuthAction::Login { .. } => match (&next.current_session, &next.last_error) {
            (Some(account), _) => AuthOutcome::Authenticated(account.clone()),
            (None, Some(_)) => AuthOutcome::InvalidCredential,
            (None, None) => AuthOutcome::NoSuchAccount,
        },
        AuthAction::Logout => AuthOutcome::SignedOut,
        AuthAction::Signup { .. } => AuthOutcome::Registered,
        AuthAction::Restore(_) => AuthOutcome::Restored(next.current_session.clone()),
    }
}
