//! Authenticated commerce API client for the back-office.
//!
//! # Architecture
//!
//! - The commerce API owns all commerce data; every admin operation here is
//!   a thin proxy over its `/api/admin/...` endpoints
//! - Authentication uses service credentials exchanged for a JWT pair;
//!   tokens are cached in memory and refreshed automatically
//! - A 401 triggers exactly one refresh (or re-authentication) and one
//!   retry, implemented once in [`ApiClient`] rather than per call site

mod auth;
mod client;
pub mod types;

pub use auth::{AdminProfile, ApiToken};
pub use client::ApiClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Credentials were rejected when obtaining or refreshing a token.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API still returned 401 after the refresh-and-retry cycle.
    #[error("Unauthorized after token refresh")]
    Unauthorized,

    /// The API rejected the request (`success: false` envelope).
    #[error("API error: {0}")]
    Api(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the commerce API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}
