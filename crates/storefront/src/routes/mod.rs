//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (sessions DB)
//!
//! # Catalog (proxied reads from the commerce API)
//! GET  /products               - Product listing (?category=, ?q=)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category listing
//! GET  /categories/{slug}      - Category detail
//!
//! # Cart (session-backed)
//! GET  /cart                   - Current cart with totals
//! POST /cart/add               - Add a line (merges on product/size/color)
//! POST /cart/update            - Set quantity (0 removes)
//! POST /cart/options           - Update size/color on a line
//! POST /cart/remove            - Remove all lines for a product id
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count badge
//!
//! # Checkout
//! POST /checkout               - Validate and submit the order
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::products_index))
        .route("/products/{id}", get(catalog::products_show))
        .route("/categories", get(catalog::categories_index))
        .route("/categories/{slug}", get(catalog::categories_show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/options", post(cart::options))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
}
