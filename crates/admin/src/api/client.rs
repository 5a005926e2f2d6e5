//! Authenticated commerce API client.
//!
//! All back-office routes proxy through this client. It owns the service
//! token lifecycle: tokens are cached in memory behind an `RwLock`,
//! refreshed proactively when close to expiry, and refreshed-then-retried
//! exactly once on a 401. That interceptor lives in
//! [`ApiClient::send_authorized`] so no call site repeats it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::instrument;

use cordwain_core::{
    CategoryId, CustomerId, NotificationId, OrderId, OrderStatus, ProductId, WebhookId,
};

use crate::config::CommerceApiConfig;

use super::ApiError;
use super::auth::{self, AdminProfile, ApiToken};
use super::types::{
    ApiEnvelope, Category, CategoryInput, Customer, CustomerInput, DashboardSummary, Notification,
    Order, OrderStatusUpdate, Paginated, Product, ProductInput, Webhook, WebhookInput,
};

/// Authenticated client for the commerce API's admin surface.
///
/// Cheaply cloneable via `Arc`; safe to share across handlers.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    service_email: String,
    service_password: SecretString,
    /// In-memory token cache
    token: RwLock<Option<ApiToken>>,
}

impl ApiClient {
    /// Create a new commerce API client without a token; the first request
    /// authenticates with the configured service credentials.
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

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                service_email: config.service_email.clone(),
                service_password: config.service_password.clone(),
                token: RwLock::new(None),
            }),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Verify an operator's credentials against the commerce API.
    ///
    /// Used by the login route; the returned profile is what gets stored in
    /// the operator's session. The operator's tokens are discarded - proxy
    /// calls run under the service identity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if credentials are invalid.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn verify_login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AdminProfile, ApiError> {
        let (_token, profile) = auth::authenticate(
            &self.inner.client,
            &self.inner.base_url,
            email,
            password,
        )
        .await?;

        Ok(profile)
    }

    /// Authenticate with the configured service credentials and cache the
    /// resulting token pair.
    async fn authenticate_service(&self) -> Result<(), ApiError> {
        let (token, _) = auth::authenticate(
            &self.inner.client,
            &self.inner.base_url,
            &self.inner.service_email,
            &self.inner.service_password,
        )
        .await?;

        *self.inner.token.write().await = Some(token);
        Ok(())
    }

    /// Refresh the cached access token, falling back to a full
    /// re-authentication when no usable refresh token exists.
    async fn refresh_token(&self) -> Result<(), ApiError> {
        let token = self.inner.token.read().await.clone();

        if let Some(token) = token
            && token.can_refresh()
            && let Some(ref refresh_token) = token.refresh_token
        {
            let new_token = auth::refresh_access_token(
                &self.inner.client,
                &self.inner.base_url,
                refresh_token,
            )
            .await?;
            *self.inner.token.write().await = Some(new_token);
            return Ok(());
        }

        self.authenticate_service().await
    }

    /// Get a usable access token string, authenticating on first use.
    async fn access_token(&self) -> Result<String, ApiError> {
        {
            let guard = self.inner.token.read().await;
            if let Some(token) = guard.as_ref()
                && !token.is_expired()
            {
                return Ok(token.access_token.expose_secret().to_string());
            }
        }

        // No token, or the cached one lapsed
        self.refresh_token().await?;

        let guard = self.inner.token.read().await;
        guard
            .as_ref()
            .map(|token| token.access_token.expose_secret().to_string())
            .ok_or(ApiError::Unauthorized)
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        access_token: &str,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .inner
            .client
            .request(method, format!("{}{path}", self.inner.base_url))
            .bearer_auth(access_token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder
    }

    /// Send an authenticated request.
    ///
    /// The single place where bearer auth and the 401 contract live: the
    /// token is attached, refreshed proactively when close to expiry, and a
    /// 401 response triggers one refresh (or re-authentication) and one
    /// retry before giving up.
    async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        // Refresh ahead of time when the token expires within 5 minutes.
        // The guard must drop before refresh_token takes the write lock.
        let expiring = {
            let guard = self.inner.token.read().await;
            guard
                .as_ref()
                .is_some_and(|token| token.expires_within(300) && token.can_refresh())
        };
        if expiring {
            let _ = self.refresh_token().await;
        }

        let access_token = self.access_token().await?;
        let response = self
            .build_request(method.clone(), path, query, body.as_ref(), &access_token)
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(path, "401 from commerce API, refreshing token and retrying once");
        self.refresh_token().await?;
        let access_token = self.access_token().await?;
        let response = self
            .build_request(method, path, query, body.as_ref(), &access_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        Ok(response)
    }

    /// Execute a request and unwrap the envelope into a typed payload.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send_authorized(method, path, query, body).await?;
        Self::decode(response).await?.into_result()
    }

    /// Execute a request whose payload is irrelevant (deletes, acks).
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let response = self.send_authorized(method, path, &[], body).await?;
        Self::decode::<serde_json::Value>(response)
            .await?
            .into_empty_result()
    }

    /// Map transport-level failures, then parse the response envelope.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("resource".to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
                return Err(ApiError::Api(
                    envelope.error.unwrap_or_else(|| format!("HTTP {status}")),
                ));
            }
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(ApiError::Api(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse commerce API response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List products with pagination and optional search.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Paginated<Product>, ApiError> {
        let mut query = vec![("page".to_string(), page.to_string())];
        if let Some(search) = search {
            query.push(("q".to_string(), search.to_string()));
        }
        self.request(Method::GET, "/api/admin/products", &query, None)
            .await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.request(Method::GET, &format!("/api/admin/products/{id}"), &[], None)
            .await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message on rejection.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(Method::POST, "/api/admin/products", &[], Some(body))
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(
            Method::PUT,
            &format!("/api/admin/products/{id}"),
            &[],
            Some(body),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/api/admin/products/{id}"), None)
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.request(Method::GET, "/api/admin/categories", &[], None)
            .await
    }

    /// Fetch a single category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.request(
            Method::GET,
            &format!("/api/admin/categories/{id}"),
            &[],
            None,
        )
        .await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message on rejection.
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(Method::POST, "/api/admin/categories", &[], Some(body))
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(
            Method::PUT,
            &format!("/api/admin/categories/{id}"),
            &[],
            Some(body),
        )
        .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/api/admin/categories/{id}"), None)
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders with pagination and optional status filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u32,
        status: Option<OrderStatus>,
    ) -> Result<Paginated<Order>, ApiError> {
        let mut query = vec![("page".to_string(), page.to_string())];
        if let Some(status) = status {
            query.push(("status".to_string(), status.to_string()));
        }
        self.request(Method::GET, "/api/admin/orders", &query, None)
            .await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.request(Method::GET, &format!("/api/admin/orders/{id}"), &[], None)
            .await
    }

    /// Request an order status transition.
    ///
    /// The commerce API owns the lifecycle and may reject invalid
    /// transitions via the envelope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message on rejection.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let body = serde_json::to_value(OrderStatusUpdate { status })?;
        self.request(
            Method::PATCH,
            &format!("/api/admin/orders/{id}/status"),
            &[],
            Some(body),
        )
        .await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/api/admin/orders/{id}"), None)
            .await
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// List customers with pagination and optional search.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Paginated<Customer>, ApiError> {
        let mut query = vec![("page".to_string(), page.to_string())];
        if let Some(search) = search {
            query.push(("q".to_string(), search.to_string()));
        }
        self.request(Method::GET, "/api/admin/customers", &query, None)
            .await
    }

    /// Fetch a single customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        self.request(
            Method::GET,
            &format!("/api/admin/customers/{id}"),
            &[],
            None,
        )
        .await
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message on rejection.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_customer(&self, input: &CustomerInput) -> Result<Customer, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(Method::POST, "/api/admin/customers", &[], Some(body))
            .await
    }

    /// Update a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        input: &CustomerInput,
    ) -> Result<Customer, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(
            Method::PUT,
            &format!("/api/admin/customers/{id}"),
            &[],
            Some(body),
        )
        .await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/api/admin/customers/{id}"), None)
            .await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// List notifications, optionally only unread ones.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        unread_only: bool,
    ) -> Result<Vec<Notification>, ApiError> {
        let query = if unread_only {
            vec![("unread".to_string(), "true".to_string())]
        } else {
            Vec::new()
        };
        self.request(Method::GET, "/api/admin/notifications", &query, None)
            .await
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the notification does not exist.
    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.request_empty(
            Method::POST,
            &format!("/api/admin/notifications/{id}/read"),
            None,
        )
        .await
    }

    /// Mark every notification as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, or envelope failures.
    #[instrument(skip(self))]
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.request_empty(Method::POST, "/api/admin/notifications/read-all", None)
            .await
    }

    /// Delete a notification.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the notification does not exist.
    #[instrument(skip(self))]
    pub async fn delete_notification(&self, id: NotificationId) -> Result<(), ApiError> {
        self.request_empty(
            Method::DELETE,
            &format!("/api/admin/notifications/{id}"),
            None,
        )
        .await
    }

    // =========================================================================
    // Webhooks
    // =========================================================================

    /// List registered webhooks.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError> {
        self.request(Method::GET, "/api/admin/webhooks", &[], None)
            .await
    }

    /// Fetch a single webhook.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the webhook does not exist.
    #[instrument(skip(self))]
    pub async fn get_webhook(&self, id: WebhookId) -> Result<Webhook, ApiError> {
        self.request(Method::GET, &format!("/api/admin/webhooks/{id}"), &[], None)
            .await
    }

    /// Register a webhook.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message on rejection.
    #[instrument(skip(self, input), fields(url = %input.url))]
    pub async fn create_webhook(&self, input: &WebhookInput) -> Result<Webhook, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(Method::POST, "/api/admin/webhooks", &[], Some(body))
            .await
    }

    /// Update a webhook.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the webhook does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_webhook(
        &self,
        id: WebhookId,
        input: &WebhookInput,
    ) -> Result<Webhook, ApiError> {
        let body = serde_json::to_value(input)?;
        self.request(
            Method::PUT,
            &format!("/api/admin/webhooks/{id}"),
            &[],
            Some(body),
        )
        .await
    }

    /// Delete a webhook.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the webhook does not exist.
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, id: WebhookId) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/api/admin/webhooks/{id}"), None)
            .await
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Fetch the aggregate counts snapshot for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth, envelope, or decode failures.
    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.request(Method::GET, "/api/admin/dashboard", &[], None)
            .await
    }
}
