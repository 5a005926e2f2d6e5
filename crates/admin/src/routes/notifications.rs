//! Notification route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::NotificationId;

use crate::api::types::Notification;
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Notification list query parameters.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    /// When true, only unread notifications are returned.
    pub unread: Option<bool>,
}

/// Notification list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>> {
    let notifications = state
        .api()
        .list_notifications(query.unread.unwrap_or(false))
        .await?;
    Ok(Json(notifications))
}

/// Mark one notification as read.
#[instrument(skip(_admin, state))]
pub async fn mark_read(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state
        .api()
        .mark_notification_read(NotificationId::new(id))
        .await?;
    Ok(Json(serde_json::json!({"success": true})))
}

/// Mark every notification as read.
#[instrument(skip(_admin, state))]
pub async fn mark_all_read(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    state.api().mark_all_notifications_read().await?;
    Ok(Json(serde_json::json!({"success": true})))
}

/// Notification delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state
        .api()
        .delete_notification(NotificationId::new(id))
        .await?;
    Ok(Json(serde_json::json!({"success": true})))
}
