//! Wire types for the commerce API.
//!
//! All payloads are camelCase JSON wrapped in the
//! `{success, data} | {success: false, error}` envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cordwain_core::{CategoryId, OrderId, ProductId};

use super::CommerceError;

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
    /// Returns [`CommerceError::Api`] when the envelope reports failure or
    /// carries no data.
    pub fn into_result(self) -> Result<T, CommerceError> {
        if self.success {
            self.data.ok_or_else(|| {
                CommerceError::Api("envelope reported success with no data".to_string())
            })
        } else {
            Err(CommerceError::Api(
                self.error
                    .unwrap_or_else(|| "unspecified API error".to_string()),
            ))
        }
    }
}

/// A catalog product.
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
    pub in_stock: bool,
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

/// An order submission request.
///
/// The commerce API performs the authoritative stock check and owns the
/// order lifecycle from here on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One line of an order submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub options: OrderItemOptions,
}

/// Variant options for an order line.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Successful order submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: OrderId,
}
