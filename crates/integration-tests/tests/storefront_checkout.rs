//! Integration tests for checkout validation and submission.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the session schema
//! - A running commerce API with at least one in-stock product
//! - The storefront server running (cargo run -p cordwain-storefront)

use reqwest::StatusCode;
use serde_json::{Value, json};

use cordwain_integration_tests::{session_client, storefront_base_url};

fn valid_contact() -> Value {
    json!({
        "customerName": "Ada Lovelace",
        "customerEmail": "ada@example.com",
        "customerPhone": "+1 555 0100"
    })
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_checkout_empty_cart_is_rejected_before_network() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&valid_contact())
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("empty"))
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_checkout_invalid_email_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&json!({
            "customerName": "Ada Lovelace",
            "customerEmail": "not-an-email",
            "customerPhone": "+1 555 0100"
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_checkout_submits_and_clears_cart() {
    let client = session_client();
    let base_url = storefront_base_url();

    // Find a product and put it in the cart
    let products: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");
    let product_id = products[0]["id"].as_i64().expect("No products available");

    client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({"productId": product_id, "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");

    // Submit the order
    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&valid_contact())
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::OK);
    let receipt: Value = resp.json().await.expect("Failed to parse receipt");
    assert!(receipt["orderId"].as_i64().is_some());

    // Successful submission clears the cart
    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");
    assert_eq!(cart["totalItems"], 0);
}
