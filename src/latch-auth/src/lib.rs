//! Latch Auth - the authentication state machine.
//!
//! - [`transition`] - pure reducer over [`SessionDatabase`](latch_session_store::SessionDatabase)
//! - [`side_effect`] - persistence work implied by a transition
//! - [`AuthController`] - single owner of the state, applies effects in the background
//! - [`SignupForm`] / [`LoginForm`] - validation in front of the controller
//! - [`available_screens`] - screen gating by session state
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use latch_auth::{AuthController, AuthOutcome, LoginForm};
//! use latch_session_store::{MemorySlot, SessionPersistence};
//!
//! #[tokio::main]
//! async fn main() {
//!     let persistence = SessionPersistence::with_default_key(Arc::new(MemorySlot::new()));
//!     let mut controller = AuthController::new(persistence);
//!     controller.bootstrap().await;
//!
//!     controller.signup("Ada", "ada@example.com", "hunter22");
//!     let form = LoginForm {
//!         email: "ada@example.com".into(),
//!         password: "hunter22".into(),
//!     };
//!     let outcome = controller.dispatch(form.validate().unwrap());
//!     assert!(matches!(outcome, AuthOutcome::Authenticated(_)));
//!     controller.flush().await;
//! }
//! ```

mod action;
mod controller;
mod reducer;
pub mod routing;
pub mod validation;
mod worker;

pub use action::{AuthAction, AuthOutcome, SessionEffect};
pub use controller::{AuthController, AuthHandle};
pub use reducer::{INVALID_CREDENTIAL, outcome, side_effect, transition};
pub use routing::{Screen, available_screens, initial_screen};
pub use validation::{Field, FieldError, LoginForm, SignupForm, ValidationErrors};
pub use worker::PersistenceQueue;
