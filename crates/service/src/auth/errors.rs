use thiserror::Error;

use crate::validation::FieldErrors;

pub const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";
pub const ACCOUNT_DISABLED: &str = "User account is disabled.";

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Unique field already taken: `username` or `email`.
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account disabled")]
    AccountDisabled,
    #[error("invalid token")]
    InvalidToken,
    #[error("token owner inactive")]
    InactiveUser,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict(_) => 1002,
            AuthError::InvalidCredentials => 1004,
            AuthError::AccountDisabled => 1005,
            AuthError::InvalidToken => 1006,
            AuthError::InactiveUser => 1007,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Field-error form of the failures a client can correct; `None` otherwise.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors.clone()),
            AuthError::Conflict(field) => Some(FieldErrors::single(field, conflict_message(field))),
            AuthError::InvalidCredentials => Some(FieldErrors::single(FieldErrors::NON_FIELD, INVALID_CREDENTIALS)),
            AuthError::AccountDisabled => Some(FieldErrors::single(FieldErrors::NON_FIELD, ACCOUNT_DISABLED)),
            _ => None,
        }
    }
}

pub fn conflict_message(field: &str) -> String {
    format!("A user with that {} already exists.", field)
}

impl From<FieldErrors> for AuthError {
    fn from(e: FieldErrors) -> Self { AuthError::Validation(e) }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Conflict(msg) if msg.contains("email") => AuthError::Conflict("email"),
            models::errors::ModelError::Conflict(msg) if msg.contains("username") => AuthError::Conflict("username"),
            other => AuthError::Repository(other.to_string()),
        }
    }
}
