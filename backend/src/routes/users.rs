//! Current user route

use crate::auth::CurrentIdentity;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use shopfront_shared::CurrentUserResponse;

/// Create user routes. Must be layered with `require_auth`.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(current_user))
}

/// GET /users/me - Identity carried by the caller's token
async fn current_user(CurrentIdentity(identity): CurrentIdentity) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: identity.user_id,
    })
}
