//! Login: credential verification followed by token issuance
//!
//! # Performance
//!
//! Password verification runs on the blocking thread pool. Token signing
//! uses the pre-computed keys and is cheap.

use crate::auth::{CredentialVerifier, TokenService};
use crate::error::ApiError;
use crate::repositories::Store;
use shopfront_shared::AccessTokenResponse;
use tracing::info;

/// Login service
pub struct AuthService;

impl AuthService {
    /// Exchange an email and password for an access token
    ///
    /// Any credential failure is `AuthError::InvalidCredentials`, whether
    /// or not the email exists.
    pub async fn login(
        store: &dyn Store,
        credentials: &CredentialVerifier,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<AccessTokenResponse, ApiError> {
        let identity = match credentials.verify(store, email, password).await {
            Ok(identity) => identity,
            Err(e) => {
                metrics::counter!("logins_total", "outcome" => failure_outcome(&e)).increment(1);
                return Err(e);
            }
        };

        let access_token = tokens.issue(identity)?;

        info!(user_id = identity.user_id, "User logged in");
        metrics::counter!("logins_total", "outcome" => "accepted").increment(1);

        Ok(AccessTokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.ttl_secs(),
        })
    }
}

/// `logins_total` outcome label for a failed login
fn failure_outcome(err: &ApiError) -> &'static str {
    match err {
        ApiError::Unauthorized(_) => "rejected",
        _ => "error",
    }
}
