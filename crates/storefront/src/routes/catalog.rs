//! Catalog route handlers.
//!
//! Thin proxies over the commerce API's catalog endpoints; responses are
//! served from the client's 5-minute cache when warm.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::ProductId;

use crate::commerce::types::{Category, Product};
use crate::error::Result;
use crate::state::AppState;

/// Product listing filters.
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    /// Category slug to filter by.
    pub category: Option<String>,
    /// Free-text search query.
    pub q: Option<String>,
}

/// Product listing handler.
#[instrument(skip(state))]
pub async fn products_index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .commerce()
        .get_products(filter.category.as_deref(), filter.q.as_deref())
        .await?;

    Ok(Json(products))
}

/// Product detail handler.
#[instrument(skip(state))]
pub async fn products_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = state.commerce().get_product(ProductId::new(id)).await?;
    Ok(Json(product))
}

/// Category listing handler.
#[instrument(skip(state))]
pub async fn categories_index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.commerce().get_categories().await?;
    Ok(Json(categories))
}

/// Category detail handler.
#[instrument(skip(state))]
pub async fn categories_show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>> {
    let category = state.commerce().get_category(&slug).await?;
    Ok(Json(category))
}
