//! Integration tests for the storefront cart flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the session schema
//!   (cw-cli migrate storefront)
//! - A running commerce API with at least one product
//! - The storefront server running (cargo run -p cordwain-storefront)

use reqwest::StatusCode;
use serde_json::{Value, json};

use cordwain_integration_tests::{session_client, storefront_base_url};

/// Fetch the first product id in the catalog, so tests work against
/// whatever seed data the commerce API holds.
async fn first_product_id(client: &reqwest::Client) -> i64 {
    let base_url = storefront_base_url();
    let products: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");

    products
        .as_array()
        .and_then(|items| items.first())
        .and_then(|product| product["id"].as_i64())
        .expect("Commerce API has no products to test against")
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_cart_starts_empty() {
    let client = session_client();
    let base_url = storefront_base_url();

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    assert_eq!(cart["totalItems"], 0);
    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_add_merge_and_totals() {
    let client = session_client();
    let base_url = storefront_base_url();
    let product_id = first_product_id(&client).await;

    // Add twice with the same variant key; lines must merge
    for quantity in [2, 3] {
        let resp = client
            .post(format!("{base_url}/cart/add"))
            .json(&json!({"productId": product_id, "quantity": quantity}))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart");

    assert_eq!(cart["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart["totalItems"], 5);
    assert_eq!(cart["lines"][0]["quantity"], 5);
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_cart_persists_across_requests() {
    let client = session_client();
    let base_url = storefront_base_url();
    let product_id = first_product_id(&client).await;

    client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({"productId": product_id}))
        .send()
        .await
        .expect("Failed to add to cart");

    // A separate request on the same session sees the line
    let count: Value = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get count")
        .json()
        .await
        .expect("Failed to parse count");

    assert_eq!(count["count"], 1);
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_set_quantity_zero_removes() {
    let client = session_client();
    let base_url = storefront_base_url();
    let product_id = first_product_id(&client).await;

    client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({"productId": product_id, "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");

    let cart: Value = client
        .post(format!("{base_url}/cart/update"))
        .json(&json!({"productId": product_id, "quantity": 0}))
        .send()
        .await
        .expect("Failed to update cart")
        .json()
        .await
        .expect("Failed to parse cart");

    assert_eq!(cart["totalItems"], 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_remove_on_empty_cart_is_noop() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/cart/remove"))
        .json(&json!({"productId": 999_999}))
        .send()
        .await
        .expect("Failed to post remove");

    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["totalItems"], 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and commerce API"]
async fn test_add_unknown_product_is_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({"productId": 999_999_999}))
        .send()
        .await
        .expect("Failed to post add");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["success"], false);
}
