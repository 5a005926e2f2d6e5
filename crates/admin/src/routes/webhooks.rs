//! Webhook management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cordwain_core::WebhookId;

use crate::api::types::{Webhook, WebhookInput};
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Webhook list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Webhook>>> {
    let webhooks = state.api().list_webhooks().await?;
    Ok(Json(webhooks))
}

/// Webhook detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Webhook>> {
    let webhook = state.api().get_webhook(WebhookId::new(id)).await?;
    Ok(Json(webhook))
}

/// Webhook create handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email, url = %input.url))]
pub async fn create(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<WebhookInput>,
) -> Result<Json<Webhook>> {
    let webhook = state.api().create_webhook(&input).await?;
    tracing::info!(webhook_id = %webhook.id, "Webhook registered");
    Ok(Json(webhook))
}

/// Webhook update handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn update(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<WebhookInput>,
) -> Result<Json<Webhook>> {
    let webhook = state
        .api()
        .update_webhook(WebhookId::new(id), &input)
        .await?;
    Ok(Json(webhook))
}

/// Webhook delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.api().delete_webhook(WebhookId::new(id)).await?;
    tracing::info!(webhook_id = id, "Webhook deleted");
    Ok(Json(serde_json::json!({"success": true})))
}
