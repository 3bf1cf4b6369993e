use thiserror::Error;

use super::validation::Violations;

/// Business errors for auth workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(Violations),
    #[error("already exists")]
    AlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid application id")]
    InvalidAppId,
    #[error("user not found")]
    UserNotFound,
    #[error("token issuer error: {0}")]
    Issuer(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::AlreadyExists => 1002,
            AuthError::UserNotFound => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::InvalidAppId => 1005,
            AuthError::Issuer(_) => 1102,
            AuthError::Internal(_) => 1200,
        }
    }
}
