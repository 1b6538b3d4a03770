//! Domain records returned by the storefront data layer

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalogue product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can currently be ordered
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Order placed by an authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
