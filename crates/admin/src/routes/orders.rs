//! Order management route handlers.
//!
//! The commerce API owns the order lifecycle; status changes here are
//! requests it may reject (surfaced through the error envelope).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::{OrderId, OrderStatus};

use crate::api::types::{Order, OrderStatusUpdate, Paginated};
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Pagination and status filter query parameters.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub status: Option<OrderStatus>,
}

/// Order list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Paginated<Order>>> {
    let page = state
        .api()
        .list_orders(query.page.unwrap_or(1), query.status)
        .await?;
    Ok(Json(page))
}

/// Order detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>> {
    let order = state.api().get_order(OrderId::new(id)).await?;
    Ok(Json(order))
}

/// Order status transition handler.
#[instrument(skip(admin, state, update), fields(operator = %admin.email, status = %update.status))]
pub async fn update_status(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<OrderStatusUpdate>,
) -> Result<Json<Order>> {
    let order = state
        .api()
        .update_order_status(OrderId::new(id), update.status)
        .await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}

/// Order delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.api().delete_order(OrderId::new(id)).await?;
    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(serde_json::json!({"success": true})))
}
