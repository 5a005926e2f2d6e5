//! Checkout route handler.
//!
//! Serializes the session cart into an order request and submits it to the
//! commerce API, which performs the authoritative stock check and owns the
//! order lifecycle from there. Validation happens before any network call;
//! the cart is cleared only after the API accepts the order.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use cordwain_core::Email;

use crate::cart::SessionCart;
use crate::commerce::types::{OrderItem, OrderItemOptions, OrderReceipt, OrderRequest};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Checkout request body: customer contact fields plus optional notes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
}

/// Validate and submit the current cart as an order.
#[instrument(skip(state, cart_store, request), fields(customer_email = %request.customer_email))]
pub async fn submit(
    State(state): State<AppState>,
    cart_store: SessionCart,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<OrderReceipt>> {
    let cart = cart_store.load().await;
    let order = build_order(&request, &cart)?;

    let receipt = state.commerce().submit_order(&order).await?;
    let total = cart.total_price();

    // The order is accepted; the pending cart is done.
    let mut cart = cart;
    cart.clear();
    if let Err(e) = cart_store.save(&cart).await {
        // The order already exists server-side, so don't fail the response;
        // the stale cart self-corrects on the next mutation.
        tracing::warn!("Failed to clear cart after order submission: {e}");
    }

    tracing::info!(order_id = %receipt.order_id, total = %total, "Order submitted");

    Ok(Json(receipt))
}

/// Build the order request, rejecting malformed input before any network call.
fn build_order(
    request: &CheckoutRequest,
    cart: &cordwain_core::CartState,
) -> Result<OrderRequest> {
    if cart.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }

    let name = request.customer_name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("customer name is required".to_string()));
    }

    let email = Email::parse(request.customer_email.trim())
        .map_err(|e| AppError::Validation(format!("invalid customer email: {e}")))?;

    let phone = request.customer_phone.trim();
    if phone.is_empty() {
        return Err(AppError::Validation(
            "customer phone is required".to_string(),
        ));
    }

    let items = cart
        .lines()
        .iter()
        .map(|line| OrderItem {
            product_id: line.product_id,
            quantity: line.quantity,
            options: OrderItemOptions {
                size: line.size.clone(),
                color: line.color.clone(),
            },
        })
        .collect();

    Ok(OrderRequest {
        customer_name: name.to_string(),
        customer_email: email.into_inner(),
        customer_phone: phone.to_string(),
        items,
        total_amount: cart.total_amount(),
        notes: request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cordwain_core::{CartLine, CartState, ProductId};
    use rust_decimal::Decimal;

    fn checkout_request() -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "+1 555 0100".to_string(),
            notes: None,
        }
    }

    fn cart_with_one_line() -> CartState {
        CartState::restore(vec![CartLine {
            product_id: ProductId::new(1),
            name: "Belt".to_string(),
            unit_price: Decimal::from(100),
            original_price: None,
            image_ref: "/images/1.jpg".to_string(),
            category: "belts".to_string(),
            quantity: 2,
            size: Some("M".to_string()),
            color: None,
            material: "full-grain".to_string(),
        }])
    }

    #[test]
    fn test_build_order_happy_path() {
        let order = build_order(&checkout_request(), &cart_with_one_line()).unwrap();

        assert_eq!(order.customer_name, "Ada Lovelace");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].options.size.as_deref(), Some("M"));
        assert_eq!(order.total_amount, Decimal::from(200));
        assert!(order.notes.is_none());
    }

    #[test]
    fn test_build_order_rejects_empty_cart() {
        let err = build_order(&checkout_request(), &CartState::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("empty")));
    }

    #[test]
    fn test_build_order_rejects_missing_name() {
        let request = CheckoutRequest {
            customer_name: "   ".to_string(),
            ..checkout_request()
        };
        let err = build_order(&request, &cart_with_one_line()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("name")));
    }

    #[test]
    fn test_build_order_rejects_bad_email() {
        let request = CheckoutRequest {
            customer_email: "not-an-email".to_string(),
            ..checkout_request()
        };
        let err = build_order(&request, &cart_with_one_line()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("email")));
    }

    #[test]
    fn test_build_order_rejects_missing_phone() {
        let request = CheckoutRequest {
            customer_phone: String::new(),
            ..checkout_request()
        };
        let err = build_order(&request, &cart_with_one_line()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("phone")));
    }

    #[test]
    fn test_build_order_blank_notes_become_none() {
        let request = CheckoutRequest {
            notes: Some("   ".to_string()),
            ..checkout_request()
        };
        let order = build_order(&request, &cart_with_one_line()).unwrap();
        assert!(order.notes.is_none());
    }
}
