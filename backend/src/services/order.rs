//! Order placement for authenticated callers

use crate::auth::IdentityClaim;
use crate::error::ApiError;
use crate::repositories::Store;
use anyhow::anyhow;
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use shopfront_shared::{CreateOrderRequest, Order};
use validator::Validate;

/// Validated order input
#[derive(Debug, Validate)]
pub struct OrderInput {
    #[validate(range(exclusive_min = 0.0, max = 1_000_000.0))]
    pub total: f64,
}

impl From<&CreateOrderRequest> for OrderInput {
    fn from(req: &CreateOrderRequest) -> Self {
        Self { total: req.total }
    }
}

/// Order service
pub struct OrderService;

impl OrderService {
    /// Place an order for the caller
    ///
    /// The total is stored with two decimal places, rounding half away
    /// from zero.
    pub async fn create(
        store: &dyn Store,
        identity: IdentityClaim,
        input: OrderInput,
    ) -> Result<Order, ApiError> {
        input
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let total = to_money(input.total)?;
        let order = store.create_order(identity.user_id, total).await?;

        Ok(order)
    }

    /// Orders placed by the caller, newest first
    pub async fn list(store: &dyn Store, identity: IdentityClaim) -> Result<Vec<Order>, ApiError> {
        Ok(store.list_orders_for_user(identity.user_id).await?)
    }
}

fn to_money(amount: f64) -> Result<Decimal, ApiError> {
    let decimal = Decimal::from_f64(amount)
        .ok_or_else(|| ApiError::Internal(anyhow!("total {} is not representable", amount)))?;
    let mut rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Ok(rounded)
}
