//! Store tests against a real Postgres database
//!
//! Run with: cargo test --features integration -- --ignored
//! Requires DATABASE_URL pointing at a scratch database.

#![cfg(feature = "integration")]

use rust_decimal::Decimal;
use shopfront_backend::{
    config::DatabaseConfig,
    db,
    repositories::{PgStore, Store},
};

async fn connect() -> PgStore {
    dotenvy::dotenv().ok();
    let config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        max_connections: 2,
    };
    let pool = db::create_pool(&config).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    PgStore::new(pool)
}

async fn insert_user(store: &PgStore, email: &str) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (email, password_hash) VALUES ($1, 'unused') \
         ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email RETURNING id",
    )
    .bind(email)
    .fetch_one(store.pool())
    .await
    .unwrap()
}

#[tokio::test]
#[ignore]
async fn test_ping() {
    let store = connect().await;
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_find_user_by_email() {
    let store = connect().await;
    let id = insert_user(&store, "pg-lookup@x.com").await;

    let found = store.find_user_by_email("pg-lookup@x.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(id));

    let by_id = store.find_user_by_id(id).await.unwrap();
    assert_eq!(by_id.unwrap().email, "pg-lookup@x.com");

    assert!(store
        .find_user_by_email("pg-nobody@x.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore]
async fn test_orders_round_trip_per_user() {
    let store = connect().await;
    let owner = insert_user(&store, "pg-orders-owner@x.com").await;
    let other = insert_user(&store, "pg-orders-other@x.com").await;

    let order = store
        .create_order(owner, Decimal::new(1999, 2))
        .await
        .unwrap();
    assert_eq!(order.user_id, owner);
    assert_eq!(order.status, "pending");

    let mine = store.list_orders_for_user(owner).await.unwrap();
    assert!(mine.iter().any(|o| o.id == order.id));

    let theirs = store.list_orders_for_user(other).await.unwrap();
    assert!(theirs.iter().all(|o| o.user_id == other));
}

#[tokio::test]
#[ignore]
async fn test_available_products_have_stock() {
    let store = connect().await;

    let products = store.list_available_products(100, 0).await.unwrap();
    assert!(products.iter().all(|p| p.is_available()));
}
