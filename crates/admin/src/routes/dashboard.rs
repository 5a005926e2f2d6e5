//! Dashboard route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::api::types::DashboardSummary;
use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Aggregate counts snapshot for the dashboard landing page.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>> {
    let summary = state.api().dashboard_summary().await?;
    Ok(Json(summary))
}
