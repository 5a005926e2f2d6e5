//! Customer management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::CustomerId;

use crate::api::types::{Customer, CustomerInput, Paginated};
use crate::error::Result;
use crate::middleware::auth::{RequireAdminAuth, RequireManager};
use crate::state::AppState;

/// Pagination and search query parameters.
#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
}

/// Customer list handler.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<Paginated<Customer>>> {
    let page = state
        .api()
        .list_customers(query.page.unwrap_or(1), query.q.as_deref())
        .await?;
    Ok(Json(page))
}

/// Customer detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>> {
    let customer = state.api().get_customer(CustomerId::new(id)).await?;
    Ok(Json(customer))
}

/// Customer create handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn create(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>> {
    let customer = state.api().create_customer(&input).await?;
    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok(Json(customer))
}

/// Customer update handler.
#[instrument(skip(admin, state, input), fields(operator = %admin.email))]
pub async fn update(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>> {
    let customer = state
        .api()
        .update_customer(CustomerId::new(id), &input)
        .await?;
    Ok(Json(customer))
}

/// Customer delete handler.
#[instrument(skip(admin, state), fields(operator = %admin.email))]
pub async fn destroy(
    RequireManager(admin): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.api().delete_customer(CustomerId::new(id)).await?;
    tracing::info!(customer_id = id, "Customer deleted");
    Ok(Json(serde_json::json!({"success": true})))
}
