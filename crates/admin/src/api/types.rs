//! Wire types for the commerce API's admin surface.
//!
//! All payloads are camelCase JSON wrapped in the
//! `{success, data} | {success: false, error}` envelope.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cordwain_core::{
    CategoryId, CustomerId, NotificationId, NotificationKind, OrderId, OrderStatus, ProductId,
    WebhookId,
};

use super::ApiError;

/// Standard response envelope used by every commerce API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the envelope reports failure or
    /// carries no data.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            self.data
                .ok_or_else(|| ApiError::Api("envelope reported success with no data".to_string()))
        } else {
            Err(ApiError::Api(
                self.error
                    .unwrap_or_else(|| "unspecified API error".to_string()),
            ))
        }
    }

    /// Unwrap an envelope whose payload is irrelevant (deletes, acks).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] when the envelope reports failure.
    pub fn into_empty_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Api(
                self.error
                    .unwrap_or_else(|| "unspecified API error".to_string()),
            ))
        }
    }
}

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

// =============================================================================
// Products & Categories
// =============================================================================

/// A product as seen by the back-office (includes stock).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image_ref: String,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub material: String,
    pub stock_quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub image_ref: String,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub material: String,
    pub stock_quantity: u32,
}

/// A catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// An order tracked by the commerce API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of a tracked order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Status transition request for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

// =============================================================================
// Customers
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub orders_count: u32,
    pub total_spent: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Notifications & Webhooks
// =============================================================================

/// A back-office notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A registered webhook endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: WebhookId,
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    /// Signing secret; redacted to `None` by the API on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Create/update payload for a webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInput {
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Aggregate counts for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub orders: u64,
    pub pending_orders: u64,
    pub products: u64,
    pub customers: u64,
    pub unread_notifications: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_empty_result() {
        let ok: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.into_empty_result().is_ok());

        let failed: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":false,"error":"nope"}"#).unwrap();
        let err = failed.into_empty_result().unwrap_err();
        assert!(matches!(err, ApiError::Api(msg) if msg == "nope"));
    }

    #[test]
    fn test_paginated_decode() {
        let page: Paginated<Category> = serde_json::from_str(
            r#"{
                "items": [{"id": 1, "name": "Belts", "slug": "belts"}],
                "page": 1,
                "totalPages": 3,
                "totalItems": 55
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].slug, "belts");
    }

    #[test]
    fn test_order_decode() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 17,
                "customerName": "Ada Lovelace",
                "customerEmail": "ada@example.com",
                "customerPhone": "+1 555 0100",
                "items": [{
                    "productId": 1,
                    "name": "Belt",
                    "quantity": 2,
                    "unitPrice": "100.00",
                    "size": "M"
                }],
                "totalAmount": "200.00",
                "status": "pending",
                "createdAt": "2026-07-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, OrderId::new(17));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items[0].size.as_deref(), Some("M"));
        assert!(order.items[0].color.is_none());
    }

    #[test]
    fn test_order_status_update_wire_format() {
        let update = OrderStatusUpdate {
            status: OrderStatus::Confirmed,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "confirmed");
    }
}
