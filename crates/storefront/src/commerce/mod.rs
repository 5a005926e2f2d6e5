//! Commerce API client.
//!
//! # Architecture
//!
//! - The commerce API is the source of truth for products, categories, and
//!   orders - NO local sync, direct REST calls
//! - Responses use the `{success, data} | {success: false, error}` envelope
//! - In-memory caching via `moka` for catalog reads (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use cordwain_storefront::commerce::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce);
//!
//! // Browse the catalog
//! let products = client.get_products(Some("belts"), None).await?;
//!
//! // Submit an order
//! let receipt = client.submit_order(&order).await?;
//! ```

mod client;
pub mod types;

pub use client::CommerceClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the commerce API.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commerce_error_display() {
        let err = CommerceError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = CommerceError::Api("insufficient stock".to_string());
        assert_eq!(err.to_string(), "API error: insufficient stock");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CommerceError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
