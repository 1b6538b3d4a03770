//! In-process store
//!
//! Holds everything behind a single `RwLock`. Meant for tests and local
//! demos, not for production traffic.

use super::{Store, UserRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shopfront_shared::{Order, Product};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i32, UserRecord>,
    products: BTreeMap<i32, Product>,
    orders: Vec<Order>,
}

/// Store kept entirely in memory
///
/// Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user with an already-hashed password
    pub fn insert_user(&self, id: i32, email: &str, password_hash: &str) {
        self.write().users.insert(
            id,
            UserRecord {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// Add or replace a product
    pub fn insert_product(&self, product: Product) {
        self.write().products.insert(product.id, product);
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.read().products.get(&id).cloned())
    }

    async fn list_available_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let limit = usize::try_from(limit.max(0))?;
        let offset = usize::try_from(offset.max(0))?;

        Ok(self
            .read()
            .products
            .values()
            .filter(|product| product.is_available())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_order(&self, user_id: i32, total: Decimal) -> Result<Order> {
        let mut inner = self.write();
        let id = i32::try_from(inner.orders.len())? + 1;
        let order = Order {
            id,
            user_id,
            total,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders_for_user(&self, user_id: i32) -> Result<Vec<Order>> {
        Ok(self
            .read()
            .orders
            .iter()
            .rev()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
