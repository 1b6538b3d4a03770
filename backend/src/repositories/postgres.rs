//! Postgres-backed store

use super::{Store, UserRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopfront_shared::{Order, Product};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            user_id: row.user_id,
            total: row.total,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Store over a Postgres connection pool
///
/// Cloning is O(1); `PgPool` is internally reference counted.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_product(&self, id: i32) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product.map(Product::from))
    }

    async fn list_available_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, created_at
            FROM products
            WHERE stock > 0
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn create_order(&self, user_id: i32, total: Decimal) -> Result<Order> {
        let order = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (user_id, total)
            VALUES ($1, $2)
            RETURNING id, user_id, total, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(total)
        .fetch_one(&self.pool)
        .await?;

        Ok(order.into())
    }

    async fn list_orders_for_user(&self, user_id: i32) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, total, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders.into_iter().map(Order::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
