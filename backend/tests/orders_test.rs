//! Integration tests for the order and product endpoints

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_list_orders() {
    let app = common::TestApp::new();
    app.seed_user(1, "a@x.com", "correct");
    let token = app.login("a@x.com", "correct").await;

    let (status, body) = app
        .post_auth("/orders", &json!({ "total": 19.999 }).to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let order: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(order["user_id"], 1);
    assert_eq!(order["total"], "20.00");
    assert_eq!(order["status"], "pending");

    let (status, body) = app.get_auth("/orders", &token).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_orders_are_scoped_to_caller() {
    let app = common::TestApp::new();
    app.seed_user(1, "a@x.com", "correct");
    app.seed_user(2, "b@x.com", "correct");
    let alice = app.login("a@x.com", "correct").await;
    let bob = app.login("b@x.com", "correct").await;

    app.post_auth("/orders", &json!({ "total": 5.0 }).to_string(), &alice)
        .await;

    let (status, body) = app.get_auth("/orders", &bob).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn test_invalid_order_total_rejected() {
    let app = common::TestApp::new();
    app.seed_user(1, "a@x.com", "correct");
    let token = app.login("a@x.com", "correct").await;

    let (status, body) = app
        .post_auth("/orders", &json!({ "total": -1.0 }).to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_order_without_token_rejected() {
    let app = common::TestApp::new();

    let (status, body) = app.post("/orders", &json!({ "total": 5.0 }).to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "");
}

#[tokio::test]
async fn test_product_listing_and_lookup() {
    let app = common::TestApp::new();
    app.seed_product(1, "Mug", 1250, 4);
    app.seed_product(2, "Sold out poster", 900, 0);

    let (status, body) = app.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    let products: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["name"], "Mug");
    assert_eq!(products[0]["price"], "12.50");

    let (status, _) = app.get("/products/2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_product_id_is_not_found() {
    let app = common::TestApp::new();
    app.seed_product(1, "Mug", 1250, 4);

    for path in ["/products/abc", "/products/1x", "/products/99999999999"] {
        let (status, body) = app.get(path).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_product_pagination_bounds() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/products?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/products?limit=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/products?limit=5&offset=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
