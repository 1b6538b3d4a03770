//! Order routes for the authenticated caller

use crate::auth::CurrentIdentity;
use crate::error::{ApiError, ApiResult};
use crate::services::order::{OrderInput, OrderService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use shopfront_shared::{CreateOrderRequest, Order};

/// Create order routes. Must be layered with `require_auth`.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/orders", post(create_order).get(list_orders))
}

/// POST /orders - Place an order as the caller
async fn create_order(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let order = OrderService::create(state.store(), identity, OrderInput::from(&req)).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders - The caller's orders, newest first
async fn list_orders(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = OrderService::list(state.store(), identity).await?;
    Ok(Json(orders))
}
