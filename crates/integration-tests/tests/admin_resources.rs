//! Integration tests for the back-office proxy surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the session schema
//!   (cw-cli migrate admin)
//! - A running commerce API with an operator account
//! - The admin server running (cargo run -p cordwain-admin)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` in the environment

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use cordwain_integration_tests::{admin_base_url, session_client};

/// Log in and return a client whose session carries the operator identity.
async fn authenticated_client() -> Client {
    let client = session_client();
    let base_url = admin_base_url();

    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL not set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD not set");

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);

    client
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_unauthenticated_requests_are_rejected() {
    let client = session_client();
    let base_url = admin_base_url();

    for path in [
        "/dashboard",
        "/products",
        "/orders",
        "/customers",
        "/notifications",
        "/webhooks",
    ] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_login_rejects_bad_credentials() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": "nobody@example.com", "password": "wrong"}))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_dashboard_summary_shape() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let summary: Value = client
        .get(format!("{base_url}/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard")
        .json()
        .await
        .expect("Failed to parse dashboard");

    for field in [
        "orders",
        "pendingOrders",
        "products",
        "customers",
        "unreadNotifications",
    ] {
        assert!(summary[field].is_u64(), "missing field {field}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_product_crud_roundtrip() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();
    let marker = uuid::Uuid::new_v4();

    // Create
    let created: Value = client
        .post(format!("{base_url}/products"))
        .json(&json!({
            "name": format!("Test Belt {marker}"),
            "description": "Integration test product",
            "price": "89.00",
            "imageRef": "/images/test.jpg",
            "category": "belts",
            "sizes": ["M", "L"],
            "colors": ["tan"],
            "material": "full-grain",
            "stockQuantity": 5
        }))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse created product");
    let id = created["id"].as_i64().expect("Created product has no id");

    // Read back
    let fetched: Value = client
        .get(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to fetch product")
        .json()
        .await
        .expect("Failed to parse product");
    assert_eq!(fetched["name"], created["name"]);

    // Update
    let resp = client
        .put(format!("{base_url}/products/{id}"))
        .json(&json!({
            "name": format!("Test Belt {marker} v2"),
            "description": "Integration test product",
            "price": "95.00",
            "imageRef": "/images/test.jpg",
            "category": "belts",
            "sizes": ["M", "L"],
            "colors": ["tan"],
            "material": "full-grain",
            "stockQuantity": 4
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    // Delete
    let resp = client
        .delete(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    // Gone
    let resp = client
        .get(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("Failed to fetch deleted product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_order_list_accepts_status_filter() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/orders?status=pending"))
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);

    let page: Value = resp.json().await.expect("Failed to parse orders page");
    assert!(page["items"].is_array());
    assert!(page["totalPages"].is_u64());
}

#[tokio::test]
#[ignore = "Requires running admin server and commerce API"]
async fn test_notifications_mark_all_read() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/notifications/read-all"))
        .send()
        .await
        .expect("Failed to mark all read");
    assert_eq!(resp.status(), StatusCode::OK);

    let unread: Value = client
        .get(format!("{base_url}/notifications?unread=true"))
        .send()
        .await
        .expect("Failed to list unread")
        .json()
        .await
        .expect("Failed to parse notifications");
    assert_eq!(unread.as_array().map(Vec::len), Some(0));
}
