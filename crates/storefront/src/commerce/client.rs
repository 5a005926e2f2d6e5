//! Commerce API client implementation.
//!
//! Uses `reqwest` for HTTP with the `{success, data}` envelope decoded via
//! `serde_json`. Catalog reads are cached using `moka` (5-minute TTL); order
//! submission is never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use cordwain_core::ProductId;

use crate::config::CommerceApiConfig;

use super::CommerceError;
use super::types::{ApiEnvelope, Category, OrderReceipt, OrderRequest, Product};

/// Header carrying the storefront access token.
const STOREFRONT_TOKEN_HEADER: &str = "x-storefront-token";

/// Cached catalog values, keyed by request shape.
#[derive(Clone)]
enum CacheValue {
    Product(Product),
    ProductList(Vec<Product>),
    Category(Category),
    CategoryList(Vec<Category>),
}

/// Client for the commerce API catalog and order endpoints.
///
/// Cheaply cloneable via `Arc`. Products and categories are cached for
/// 5 minutes; mutations bypass the cache entirely.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: String,
    storefront_token: String,
    cache: Cache<String, CacheValue>,
}

impl CommerceClient {
    /// Create a new commerce API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client,
                base_url: config.base_url.clone(),
                storefront_token: config.storefront_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products, optionally filtered by category slug and search query.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError` on transport, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, CommerceError> {
        let cache_key = format!(
            "products:{}:{}",
            category.unwrap_or_default(),
            search.unwrap_or_default()
        );
        if let Some(CacheValue::ProductList(products)) = self.inner.cache.get(&cache_key).await {
            return Ok(products);
        }

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = category {
            query.push(("category", category));
        }
        if let Some(search) = search {
            query.push(("q", search));
        }

        let products: Vec<Product> = self.get_json("/api/products", &query).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductList(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::NotFound` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CommerceError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            return Ok(product);
        }

        let product: Product = self
            .get_json(&format!("/api/products/{id}"), &[])
            .await
            .map_err(|e| match e {
                CommerceError::NotFound(_) => CommerceError::NotFound(format!("product {id}")),
                other => other,
            })?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(product.clone()))
            .await;
        Ok(product)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError` on transport, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CommerceError> {
        let cache_key = "categories".to_string();
        if let Some(CacheValue::CategoryList(categories)) = self.inner.cache.get(&cache_key).await
        {
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("/api/categories", &[]).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::CategoryList(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Fetch a single category by slug.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::NotFound` if the category does not exist.
    #[instrument(skip(self))]
    pub async fn get_category(&self, slug: &str) -> Result<Category, CommerceError> {
        let cache_key = format!("category:{slug}");
        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            return Ok(category);
        }

        let category: Category = self
            .get_json(&format!("/api/categories/{slug}"), &[])
            .await
            .map_err(|e| match e {
                CommerceError::NotFound(_) => CommerceError::NotFound(format!("category {slug}")),
                other => other,
            })?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(category.clone()))
            .await;
        Ok(category)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit an order for authoritative stock checks and persistence.
    ///
    /// Never cached and never retried; a failure here is terminal for the
    /// current user action.
    ///
    /// # Errors
    ///
    /// Returns `CommerceError::Api` with the backend's message when the
    /// order is rejected (e.g., insufficient stock).
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, CommerceError> {
        let url = format!("{}/api/orders", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .header(STOREFRONT_TOKEN_HEADER, &self.inner.storefront_token)
            .json(order)
            .send()
            .await?;

        Self::decode(response).await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Execute a GET request against the commerce API and unwrap its envelope.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CommerceError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .header(STOREFRONT_TOKEN_HEADER, &self.inner.storefront_token)
            .query(query)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Decode a commerce API response, mapping transport-level failures
    /// before unwrapping the envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CommerceError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CommerceError::NotFound("resource".to_string()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            // The backend sends its envelope even on error statuses; fall
            // back to the raw body when it doesn't.
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                return Err(CommerceError::Api(
                    envelope
                        .error
                        .unwrap_or_else(|| format!("HTTP {status}")),
                ));
            }
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(CommerceError::Api(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse commerce API response"
            );
            CommerceError::Parse(e)
        })?;

        envelope.into_result()
    }
}
