//! Error types for the Shopfront application

use thiserror::Error;

/// Authentication failure kinds
///
/// Every variant maps to the same unauthorized response at the network
/// boundary. The distinction is kept for logs, metrics and tests only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown lookup key or wrong password. The two are deliberately
    /// the same value.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed token")]
    Malformed,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    /// No `Authorization: Bearer <token>` header on a protected request
    #[error("Missing bearer token")]
    MissingBearer,
}

impl AuthError {
    /// Stable label used as a log field and metric label
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Malformed => "malformed",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "expired",
            AuthError::MissingBearer => "missing_bearer",
        }
    }
}
