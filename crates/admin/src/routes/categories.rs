//! Category management route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cordwain_core::CategoryId;

use crate::api::types::{Category, CategoryInput};
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Category list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = state.api().list_categories().await?;
    Ok(Json(categories))
}

/// Category detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>> {
    let category = state.api().get_category(CategoryId::new(id)).await?;
    Ok(Json(category))
}

/// Category create handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn create(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>> {
    let category = state.api().create_category(&input).await?;
    tracing::info!(category_id = %category.id, "Category created");
    Ok(Json(category))
}

/// Category update handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn update(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>> {
    let category = state
        .api()
        .update_category(CategoryId::new(id), &input)
        .await?;
    Ok(Json(category))
}

/// Category delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.api().delete_category(CategoryId::new(id)).await?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(Json(serde_json::json!({"success": true})))
}
