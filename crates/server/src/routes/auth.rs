use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use service::auth::errors::AuthError;
use service::auth::validation;
use service::auth::AuthService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
}

#[derive(Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub app_id: i64,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
}

#[derive(Serialize)]
pub struct IsAdminOutput {
    pub user_id: i64,
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct LogoutInput {
    pub token: String,
}

pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, ApiError> {
    validation::validate_register(&input.email, &input.password).map_err(AuthError::Validation)?;

    let user_id = state.auth.register_user(&input.email, &input.password).await?;
    Ok(Json(RegisterOutput { user_id }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    validation::validate_login(&input.email, &input.password, input.app_id)
        .map_err(AuthError::Validation)?;

    let token = state.auth.login(&input.email, &input.password, input.app_id).await?;
    Ok(Json(LoginOutput { token }))
}

pub async fn is_admin(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<IsAdminOutput>, ApiError> {
    validation::validate_user_id(user_id).map_err(AuthError::Validation)?;

    let is_admin = state.auth.is_admin(user_id).await?;
    Ok(Json(IsAdminOutput { user_id, is_admin }))
}

pub async fn logout(
    State(state): State<ServerState>,
    Json(input): Json<LogoutInput>,
) -> Result<StatusCode, ApiError> {
    state.auth.logout(&input.token)?;
    Ok(StatusCode::NO_CONTENT)
}
