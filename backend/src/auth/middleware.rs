//! Authentication middleware
//!
//! `require_auth` is layered over every protected route. It either attaches
//! the caller's [`IdentityClaim`] to the request and runs the rest of the
//! pipeline, or answers 401 without touching the inner handler.

use super::IdentityClaim;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use shopfront_shared::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, as attached by [`require_auth`]
///
/// Rejects with 401 when the route is not behind the middleware, so a
/// handler that asks for it can never run unauthenticated.
#[derive(Debug, Clone, Copy)]
pub struct CurrentIdentity(pub IdentityClaim);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityClaim>()
            .copied()
            .map(CurrentIdentity)
            .ok_or(ApiError::Unauthorized(AuthError::MissingBearer))
    }
}

/// Fail-closed bearer token check
///
/// Apply with `axum::middleware::from_fn_with_state`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(AuthError::MissingBearer)?;
    let identity = state.tokens().verify(token)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// The token from an `Authorization: Bearer <token>` header, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}
