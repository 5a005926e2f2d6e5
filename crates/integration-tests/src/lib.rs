//! Integration tests for Cordwain.
//!
//! # Running Tests
//!
//! These tests drive a running storefront/admin pair over HTTP and are
//! ignored by default:
//!
//! ```bash
//! # Start the session database, the commerce API, and both servers, then:
//! cargo test -p cordwain-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart flow against the storefront
//! - `storefront_checkout` - Checkout validation and submission
//! - `admin_resources` - Back-office proxy surface

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin back-office (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store, so the session (and with it
/// the cart) persists across requests within one test.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
