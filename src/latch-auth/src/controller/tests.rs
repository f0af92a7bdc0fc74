//! Tests for the auth controller and its persistence side effects.

use std::sync::Arc;

use latch_session_store::{
    Account, DEFAULT_SLOT_KEY, FileSlot, MemorySlot, SessionPersistence, SlotOp,
};
use pretty_assertions::assert_eq;

use super::AuthController;
use crate::action::{AuthAction, AuthOutcome};
use crate::reducer::INVALID_CREDENTIAL;
use crate::routing::Screen;

fn controller_with(slot: Arc<MemorySlot>) -> AuthController {
    AuthController::new(SessionPersistence::with_default_key(slot))
}

fn writes(slot: &MemorySlot) -> Vec<String> {
    slot.ops()
        .into_iter()
        .filter_map(|op| match op {
            SlotOp::Write { value, .. } => Some(value),
            _ => None,
        })
        .collect()
}

fn deletes(slot: &MemorySlot) -> usize {
    slot.ops()
        .iter()
        .filter(|op| matches!(op, SlotOp::Delete { .. }))
        .count()
}

#[tokio::test]
async fn test_signup_never_persists() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());

    assert_eq!(
        controller.signup("Ada", "ada@example.com", "hunter22"),
        AuthOutcome::Registered
    );
    assert_eq!(
        controller.signup("Bob", "bob@example.com", "hunter22"),
        AuthOutcome::Registered
    );
    controller.flush().await;

    let state = controller.snapshot();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.current_session, None);
    assert!(slot.ops().is_empty());
}

#[tokio::test]
async fn test_login_persists_matched_record() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());
    controller.signup("Ada", "ada@example.com", "hunter22");

    let outcome = controller.login("ADA@example.com", "hunter22");
    let ada = Account::new("Ada", "ada@example.com", "hunter22");
    assert_eq!(outcome, AuthOutcome::Authenticated(ada.clone()));
    controller.flush().await;

    let written = writes(&slot);
    assert_eq!(written.len(), 1);
    let persisted: Account = serde_json::from_str(&written[0]).unwrap();
    assert_eq!(persisted, ada);
}

#[tokio::test]
async fn test_failed_login_leaves_slot_untouched() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());
    controller.signup("Ada", "ada@example.com", "hunter22");

    assert_eq!(
        controller.login("ada@example.com", "wrong-pass"),
        AuthOutcome::InvalidCredential
    );
    assert_eq!(
        controller.handle().last_error().as_deref(),
        Some(INVALID_CREDENTIAL)
    );

    assert_eq!(
        controller.login("nobody@example.com", "hunter22"),
        AuthOutcome::NoSuchAccount
    );
    assert_eq!(controller.handle().last_error(), None);

    controller.flush().await;
    assert!(slot.ops().is_empty());
}

#[tokio::test]
async fn test_logout_deletes_slot() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());
    controller.signup("Ada", "ada@example.com", "hunter22");
    controller.login("ada@example.com", "hunter22");

    assert_eq!(controller.logout(), AuthOutcome::SignedOut);
    controller.flush().await;

    assert!(!controller.is_authenticated());
    assert_eq!(deletes(&slot), 1);
    assert_eq!(slot.peek(DEFAULT_SLOT_KEY), None);
}

#[tokio::test]
async fn test_logout_when_anonymous_still_deletes() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());

    controller.logout();
    controller.flush().await;
    assert_eq!(deletes(&slot), 1);
}

#[tokio::test]
async fn test_bootstrap_restores_persisted_session() {
    let ada = Account::new("Ada", "ada@example.com", "hunter22");
    let slot = Arc::new(MemorySlot::with_value(
        DEFAULT_SLOT_KEY,
        r#"{"name":"Ada","email":"ada@example.com","password":"hunter22"}"#,
    ));
    let mut controller = controller_with(slot);

    assert_eq!(controller.bootstrap().await, Some(ada.clone()));
    let state = controller.snapshot();
    assert_eq!(state.current_session, Some(ada));
    assert!(state.records.is_empty());
    assert!(controller.is_restored());
}

#[tokio::test]
async fn test_bootstrap_with_corrupt_slot_starts_signed_out() {
    let slot = Arc::new(MemorySlot::with_value(DEFAULT_SLOT_KEY, "not json at all"));
    let mut controller = controller_with(slot);

    assert_eq!(controller.bootstrap().await, None);
    assert!(!controller.is_authenticated());
}

#[tokio::test]
async fn test_bootstrap_with_failing_read_starts_signed_out() {
    let slot = Arc::new(MemorySlot::new());
    slot.fail_reads(true);
    let mut controller = controller_with(slot);

    assert_eq!(controller.bootstrap().await, None);
    assert!(controller.is_restored());
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());

    assert_eq!(controller.bootstrap().await, None);
    controller.signup("Ada", "ada@example.com", "hunter22");
    controller.login("ada@example.com", "hunter22");

    // A second bootstrap must not read the slot again or reset the session.
    let again = controller.bootstrap().await;
    assert_eq!(again.map(|a| a.email), Some("ada@example.com".to_string()));
    assert!(controller.is_authenticated());

    let reads = slot
        .ops()
        .iter()
        .filter(|op| matches!(op, SlotOp::Read { .. }))
        .count();
    assert_eq!(reads, 1);
}

#[tokio::test]
async fn test_restore_after_bootstrap_is_ignored() {
    let slot = Arc::new(MemorySlot::new());
    let mut controller = controller_with(slot.clone());
    controller.bootstrap().await;
    controller.signup("Ada", "ada@example.com", "hunter22");
    controller.login("ada@example.com", "hunter22");

    let outcome = controller.dispatch(AuthAction::Restore(None));
    controller.flush().await;

    assert_eq!(
        outcome,
        AuthOutcome::Restored(Some(Account::new("Ada", "ada@example.com", "hunter22")))
    );
    assert!(controller.is_authenticated());
    assert!(slot.peek(DEFAULT_SLOT_KEY).is_some());
}

#[tokio::test]
async fn test_direct_restore_skips_bootstrap() {
    let slot = Arc::new(MemorySlot::with_value(
        DEFAULT_SLOT_KEY,
        r#"{"name":"Bob","email":"bob@example.com","password":"hunter22"}"#,
    ));
    let mut controller = controller_with(slot.clone());

    controller.dispatch(AuthAction::Restore(None));
    assert!(controller.is_restored());
    assert_eq!(controller.bootstrap().await, None);
    assert!(!controller.is_authenticated());
    assert!(
        !slot
            .ops()
            .iter()
            .any(|op| matches!(op, SlotOp::Read { .. }))
    );
}

#[tokio::test]
async fn test_write_failure_keeps_session_in_memory() {
    let slot = Arc::new(MemorySlot::new());
    slot.fail_writes(true);
    let mut controller = controller_with(slot.clone());
    controller.signup("Ada", "ada@example.com", "hunter22");

    let outcome = controller.login("ada@example.com", "hunter22");
    controller.flush().await;

    assert!(matches!(outcome, AuthOutcome::Authenticated(_)));
    assert!(controller.is_authenticated());
    assert_eq!(slot.peek(DEFAULT_SLOT_KEY), None);
}

#[tokio::test]
async fn test_login_then_logout_leaves_slot_empty() {
    let dir = tempfile::tempdir().unwrap();
    let slot = Arc::new(FileSlot::new(dir.path()));
    let mut controller = AuthController::new(SessionPersistence::with_default_key(slot.clone()));

    controller.signup("Ada", "ada@example.com", "hunter22");
    controller.login("ada@example.com", "hunter22");
    controller.logout();
    controller.flush().await;

    assert!(!dir.path().join(format!("{DEFAULT_SLOT_KEY}.json")).exists());
}

#[tokio::test]
async fn test_session_survives_restart_but_records_do_not() {
    let dir = tempfile::tempdir().unwrap();

    {
        let slot = Arc::new(FileSlot::new(dir.path()));
        let mut controller = AuthController::new(SessionPersistence::with_default_key(slot));
        controller.signup("Ada", "ada@example.com", "hunter22");
        controller.signup("Bob", "bob@example.com", "hunter22");
        controller.login("ada@example.com", "hunter22");
        controller.flush().await;
    }

    let slot = Arc::new(FileSlot::new(dir.path()));
    let mut controller = AuthController::new(SessionPersistence::with_default_key(slot));
    let restored = controller.bootstrap().await;

    assert_eq!(restored.map(|a| a.name), Some("Ada".to_string()));
    assert!(controller.snapshot().records.is_empty());
    assert_eq!(
        controller.login("bob@example.com", "hunter22"),
        AuthOutcome::NoSuchAccount
    );
}

#[tokio::test]
async fn test_handle_follows_changes() {
    let mut controller = controller_with(Arc::new(MemorySlot::new()));
    let mut handle = controller.handle();
    assert_eq!(handle.screens(), &[Screen::Login, Screen::Signup]);

    controller.dispatch(AuthAction::Restore(Some(Account::new(
        "Ada",
        "ada@example.com",
        "hunter22",
    ))));

    assert!(handle.changed().await);
    assert!(handle.is_authenticated());
    assert_eq!(handle.screens(), &[Screen::Home]);
    assert_eq!(
        handle.current_session().map(|a| a.email),
        Some("ada@example.com".to_string())
    );
}

#[tokio::test]
async fn test_handle_reports_dropped_controller() {
    let controller = controller_with(Arc::new(MemorySlot::new()));
    let mut handle = controller.handle();
    drop(controller);
    assert!(!handle.changed().await);
}
