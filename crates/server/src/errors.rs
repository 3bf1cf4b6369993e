use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;

/// Transport wrapper mapping domain errors onto HTTP statuses. Validation is
/// the caller's fault (400), conflicts are 409, absent resources 404, and
/// anything unexpected collapses into a generic 500 payload.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AuthError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "validation failed", "violations": violations})),
            )
                .into_response(),
            e @ AuthError::AlreadyExists => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response(),
            e @ (AuthError::InvalidCredentials | AuthError::InvalidAppId | AuthError::UserNotFound) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response(),
            e @ (AuthError::Issuer(_) | AuthError::Internal(_)) => {
                // detail goes to the log, never to the caller
                error!(code = e.code(), error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "internal error"})),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
