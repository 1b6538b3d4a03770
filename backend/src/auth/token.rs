//! Access token issuance and verification
//!
//! Tokens are compact HS256 JWTs carrying the caller's [`IdentityClaim`]
//! and an absolute expiry. They are stateless: nothing is stored server
//! side, so a token stays valid until it expires. There is no revocation.

use super::IdentityClaim;
use anyhow::{anyhow, ensure, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopfront_shared::AuthError;
use std::sync::Arc;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signed token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: i32,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Pre-computed signing keys
///
/// Derived once from the signing secret at startup and shared by every
/// clone of the service.
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// Issues and verifies access tokens
///
/// Cheap to clone. Build it once at startup and keep it in `AppState`.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    validation: Arc<Validation>,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a service signing with `secret`, issuing tokens that live
    /// for `ttl_secs` seconds
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Result<Self> {
        ensure!(
            !secret.expose_secret().is_empty(),
            "token signing secret must not be empty"
        );
        ensure!(ttl_secs > 0, "token ttl must be positive, got {}", ttl_secs);

        // Expiry is checked in `verify_at` so the boundary is exact: the
        // library compares with `<` and a default leeway of 60s.
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            keys: TokenKeys::new(secret),
            validation: Arc::new(validation),
            ttl_secs,
        })
    }

    /// Issue a token for `claim`, expiring `ttl_secs` from now
    #[inline]
    pub fn issue(&self, claim: IdentityClaim) -> Result<String> {
        self.issue_at(claim, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, claim: IdentityClaim, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(self.ttl_secs)
            .ok_or_else(|| anyhow!("token expiry overflows"))?;

        let claims = TokenClaims {
            sub: claim.user_id,
            iat,
            exp,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| anyhow!("Failed to sign access token: {}", e))
    }

    /// Verify a token against the current time
    #[inline]
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// The signature is checked before the payload is parsed, so a tampered
    /// payload reports `BadSignature`. A token is rejected as `Expired` once
    /// `now` reaches `exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaim, AuthError> {
        let data = decode::<TokenClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        if now.timestamp() >= data.claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(IdentityClaim {
            user_id: data.claims.sub,
        })
    }

    /// Lifetime of issued tokens in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}
