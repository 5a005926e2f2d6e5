//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::api::ApiClient;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; exposes the configuration, the session
/// database pool, and the authenticated commerce API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    api: ApiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let api = ApiClient::new(&config.commerce);

        Self {
            inner: Arc::new(AppStateInner { config, pool, api }),
        }
    }

    /// Get a reference to the back-office configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the session database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}
