//! Operator authentication route handlers.
//!
//! Login verifies credentials against the commerce API and stores the
//! operator's identity in the session; proxy calls themselves run under the
//! client's service identity.

use axum::{Json, extract::State};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verify operator credentials and start a session.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>> {
    let password = SecretString::from(request.password);

    let profile = state
        .api()
        .verify_login(&request.email, &password)
        .await
        .map_err(|e| match e {
            ApiError::AuthenticationFailed(_) => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            other => AppError::from(other),
        })?;

    let admin = CurrentAdmin::from(profile);
    set_current_admin(&session, &admin).await?;

    tracing::info!(operator = %admin.email, "Operator logged in");

    Ok(Json(admin))
}

/// End the operator's session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_admin(&session).await?;
    Ok(Json(serde_json::json!({"success": true})))
}

/// Current operator profile.
#[instrument(skip(admin))]
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
