//! Form validation in front of the auth state machine.
//!
//! Forms are validated into an [`AuthAction`]; the reducer itself assumes
//! well-formed input and never rejects anything.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::action::AuthAction;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const INVALID_EMAIL: &str = "Invalid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// A single rejected field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_errors(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The message for `field`, if it failed.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw sign-up form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<AuthAction, ValidationErrors> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Name,
                message: NAME_REQUIRED,
            });
        }
        check_credentials(&self.email, &self.password, &mut errors);

        if errors.is_empty() {
            Ok(AuthAction::signup(&self.name, &self.email, &self.password))
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<AuthAction, ValidationErrors> {
        let mut errors = Vec::new();
        check_credentials(&self.email, &self.password, &mut errors);

        if errors.is_empty() {
            Ok(AuthAction::login(&self.email, &self.password))
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn check_credentials(email: &str, password: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_email(email) {
        errors.push(FieldError {
            field: Field::Email,
            message: INVALID_EMAIL,
        });
    }

    if password.is_empty() {
        errors.push(FieldError {
            field: Field::Password,
            message: PASSWORD_REQUIRED,
        });
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError {
            field: Field::Password,
            message: PASSWORD_TOO_SHORT,
        });
    }
}

/// Syntactic email check. The local part may not start with a dot or contain `..`.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}
