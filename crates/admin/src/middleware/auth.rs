//! Authentication extractors for the back-office.
//!
//! Route handlers state their requirement in the signature: every
//! authenticated route takes [`RequireAdminAuth`], and destructive routes
//! take [`RequireManager`] instead.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires a logged-in operator.
///
/// Rejects with 401 when the session carries no operator identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Rejection for authentication extractors.
pub enum AuthRejection {
    /// No operator in the session.
    Unauthorized,
    /// Operator lacks the role required for this route.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "error": "Not logged in"})),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "success": false,
                    "error": "This operation requires more than viewer access"
                })),
            )
                .into_response(),
        }
    }
}

/// Read the operator identity out of the session, if present.
async fn current_admin(parts: &Parts) -> Option<CurrentAdmin> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_admin(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

/// Extractor that requires a write-capable operator (admin or super admin).
///
/// Viewers can browse everything but mutate nothing.
pub struct RequireManager(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireManager
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        if !admin.role.can_write() {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Helper to set the current operator in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current operator from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
