use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use service::auth::errors::AuthError;
use service::auth::validation::{Violation, Violations};

use super::auth::ServerState;
use crate::errors::ApiError;

#[derive(Deserialize)]
pub struct CreateApplicationInput {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateApplicationOutput {
    pub app_id: i64,
}

/// Administrative provisioning path: registers an application that login
/// tokens can be scoped to.
pub async fn create_application(
    State(state): State<ServerState>,
    Json(input): Json<CreateApplicationInput>,
) -> Result<Json<CreateApplicationOutput>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError(AuthError::Validation(Violations(vec![Violation {
            field: "name",
            message: "name is required",
        }]))));
    }

    let app_id = state.auth.create_application(&input.name).await?;
    Ok(Json(CreateApplicationOutput { app_id }))
}
