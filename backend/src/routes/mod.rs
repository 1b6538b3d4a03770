//! Route definitions for the Shopfront API
//!
//! Public routes (login, catalogue, health) and protected routes (current
//! user, orders) share one router. Protected routes sit behind
//! `require_auth`, which runs before their handlers.

use crate::auth::require_auth;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod orders;
mod products;
mod users;


pub use auth::auth_routes;
pub use orders::order_routes;
pub use products::product_routes;
pub use users::user_routes;

/// Largest request body accepted
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(health::metrics))
        .merge(auth::auth_routes())
        .merge(products::product_routes())
        .merge(protected_routes(state.clone()))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes that require a valid bearer token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(users::user_routes())
        .merge(orders::order_routes())
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
