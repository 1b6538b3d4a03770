//! Authentication routes
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed signing keys from AppState (no per-request key derivation)
//! - Password verification runs on blocking thread pool (doesn't block async runtime)

use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use shopfront_shared::{AccessTokenResponse, LoginRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login with email and password
///
/// POST /login
///
/// Any credential failure is a 401 with an empty body.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let response = AuthService::login(
        state.store(),
        state.credentials(),
        state.tokens(),
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(response))
}
