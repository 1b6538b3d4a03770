//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory store, so these tests need no
//! database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::SecretString;
use shopfront_backend::{
    config::{AppConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig},
    repositories::MemoryStore,
    routes,
    state::AppState,
};
use shopfront_shared::Product;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a test application issuing 15 minute tokens
    pub fn new() -> Self {
        Self::with_ttl(900)
    }

    /// Create a test application issuing tokens that live `ttl_secs`
    pub fn with_ttl(ttl_secs: i64) -> Self {
        Self::with_secret(TEST_SECRET, ttl_secs)
    }

    /// Create a test application signing with `secret`
    pub fn with_secret(secret: &str, ttl_secs: i64) -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), test_config(secret, ttl_secs))
            .expect("Failed to build test state");
        let app = routes::create_router(state.clone());

        Self { app, state, store }
    }

    /// Add a user whose password is hashed with the test work factor
    pub fn seed_user(&self, id: i32, email: &str, password: &str) {
        let hash = self
            .state
            .credentials()
            .hash_password(password)
            .expect("Failed to hash password");
        self.store.insert_user(id, email, &hash);
    }

    /// Add a product priced in cents
    pub fn seed_product(&self, id: i32, name: &str, price_cents: i64, stock: i32) {
        self.store.insert_product(Product {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::new(price_cents, 2),
            stock,
            created_at: Utc::now(),
        });
    }

    /// Log in and return the access token, panicking on failure
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });
        let (status, response) = self.post("/login", &body.to_string()).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", response);

        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["access_token"].as_str().unwrap().to_string()
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body and a bearer token
    pub async fn post_auth(&self, path: &str, body: &str, token: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config(secret: &str, ttl_secs: i64) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "memory".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: Some(SecretString::new(secret.to_string())),
            access_token_expiry_secs: ttl_secs,
        },
        // Smallest work factor Argon2 accepts
        password: PasswordConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
    }
}
