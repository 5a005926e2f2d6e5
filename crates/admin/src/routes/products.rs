//! Product management route handlers.
//!
//! Each handler is a thin proxy: extract, call the commerce API, return the
//! payload. Role checks live in the extractors.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::ProductId;

use crate::api::types::{Paginated, Product, ProductInput};
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Pagination and search query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
}

/// Product list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Paginated<Product>>> {
    let page = state
        .api()
        .list_products(query.page.unwrap_or(1), query.q.as_deref())
        .await?;
    Ok(Json(page))
}

/// Product detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = state.api().get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}

/// Product create handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn create(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = state.api().create_product(&input).await?;
    tracing::info!(product_id = %product.id, "Product created");
    Ok(Json(product))
}

/// Product update handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn update(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = state
        .api()
        .update_product(ProductId::new(id), &input)
        .await?;
    Ok(Json(product))
}

/// Product delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.api().delete_product(ProductId::new(id)).await?;
    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(serde_json::json!({"success": true})))
}
