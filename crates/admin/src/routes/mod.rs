//! HTTP route handlers for the back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (sessions DB)
//!
//! # Auth
//! POST /auth/login                 - Verify operator credentials, start session
//! POST /auth/logout                - End session
//! GET  /auth/me                    - Current operator profile
//!
//! # Dashboard
//! GET  /dashboard                  - Aggregate counts snapshot
//!
//! # Resources (thin proxies to the commerce API)
//! GET|POST        /products        GET|PUT|DELETE /products/{id}
//! GET|POST        /categories      GET|PUT|DELETE /categories/{id}
//! GET             /orders          GET|DELETE     /orders/{id}
//! PATCH           /orders/{id}/status
//! GET|POST        /customers       GET|PUT|DELETE /customers/{id}
//! GET             /notifications   POST /notifications/{id}/read
//! POST            /notifications/read-all          DELETE /notifications/{id}
//! GET|POST        /webhooks        GET|PUT|DELETE /webhooks/{id}
//! ```
//!
//! Reads require a logged-in operator; mutations require more than viewer
//! access (enforced by the extractors in `middleware::auth`).

pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod webhooks;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show).delete(orders::destroy))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::destroy),
        )
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::index))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/{id}", delete(notifications::destroy))
}

/// Create the webhook routes router.
pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(webhooks::index).post(webhooks::create))
        .route(
            "/{id}",
            get(webhooks::show)
                .put(webhooks::update)
                .delete(webhooks::destroy),
        )
}

/// Create all routes for the back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/orders", order_routes())
        .nest("/customers", customer_routes())
        .nest("/notifications", notification_routes())
        .nest("/webhooks", webhook_routes())
}
