//! Data access layer
//!
//! The auth core and the handlers only see the [`Store`] trait. `PgStore`
//! backs it with Postgres in production; `MemoryStore` keeps everything in
//! process for tests and local demos.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopfront_shared::{Order, Product};

/// User record as stored, including the credential hash
///
/// Never serialized. `Debug` omits the hash.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Storage collaborator used by the auth core and the route handlers
#[async_trait]
pub trait Store: Send + Sync {
    /// Credential lookup for login
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>>;

    async fn get_product(&self, id: i32) -> Result<Option<Product>>;

    /// Products with stock, ordered by id
    async fn list_available_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>>;

    async fn create_order(&self, user_id: i32, total: Decimal) -> Result<Order>;

    /// Orders placed by `user_id`, newest first
    async fn list_orders_for_user(&self, user_id: i32) -> Result<Vec<Order>>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> Result<()>;
}
