//! Login credential verification
//!
//! New hashes are Argon2id PHC strings with a configurable work factor.
//! Legacy bcrypt hashes (`$2a$`, `$2b$`, `$2y$`) are still accepted for
//! verification so existing accounts keep working.
//!
//! # Performance Considerations
//!
//! Both algorithms are intentionally CPU-intensive. Every async entry point
//! runs them on the blocking thread pool.

use super::IdentityClaim;
use crate::config::PasswordConfig;
use crate::error::ApiError;
use crate::repositories::Store;
use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use shopfront_shared::AuthError;
use std::sync::Arc;
use tracing::error;

/// Verified against when the lookup key is unknown, so that path costs the
/// same as a wrong password.
const DUMMY_PASSWORD: &str = "shopfront-dummy-password";

struct Inner {
    params: Params,
    dummy_hash: String,
}

/// Verifies login credentials against stored one-way hashes
///
/// Cheap to clone; the work factor and the dummy hash are computed once.
#[derive(Clone)]
pub struct CredentialVerifier {
    inner: Arc<Inner>,
}

impl CredentialVerifier {
    /// Build a verifier with the given Argon2id work factor
    ///
    /// Fails if the parameters are outside what Argon2 accepts.
    pub fn new(config: PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| anyhow!("Invalid argon2 parameters: {}", e))?;

        let dummy_hash = hash_with(&params, DUMMY_PASSWORD)?;

        Ok(Self {
            inner: Arc::new(Inner { params, dummy_hash }),
        })
    }

    /// Hash a password (blocking operation)
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash_with(&self.inner.params, password)
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_password_async(&self, password: String) -> Result<String> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.hash_password(&password))
            .await
            .map_err(|e| anyhow!("Task join error: {}", e))?
    }

    /// Check a password against a stored hash (blocking operation)
    ///
    /// `Ok(false)` is a mismatch. An error means the stored hash itself
    /// could not be parsed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        if is_bcrypt(stored_hash) {
            // bcrypt's InvalidHash error echoes the whole hash
            return bcrypt::verify(password, stored_hash)
                .map_err(|_| anyhow!("Invalid bcrypt hash"));
        }

        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| anyhow!("Invalid hash format: {}", e))?;
        // Params come from the PHC string, not from our configuration
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    async fn verify_password_async(&self, password: String, stored_hash: String) -> Result<bool> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| anyhow!("Task join error: {}", e))?
    }

    /// Verify `email` / `password` against the store
    ///
    /// An unknown email and a wrong password both produce
    /// `AuthError::InvalidCredentials`, after the same amount of hashing
    /// work. Store failures are internal errors, not auth outcomes.
    pub async fn verify<S>(&self, store: &S, email: &str, password: &str) -> Result<IdentityClaim, ApiError>
    where
        S: Store + ?Sized,
    {
        let record = store.find_user_by_email(email).await?;

        let Some(record) = record else {
            let dummy = self.inner.dummy_hash.clone();
            let _ = self.verify_password_async(password.to_string(), dummy).await;
            return Err(AuthError::InvalidCredentials.into());
        };

        let user_id = record.id;
        match self
            .verify_password_async(password.to_string(), record.password_hash)
            .await
        {
            Ok(true) => Ok(IdentityClaim { user_id }),
            Ok(false) => Err(AuthError::InvalidCredentials.into()),
            Err(e) => {
                // The hash is never part of the message
                error!(user_id, error = %e, "Stored credential hash is unusable");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }
}

fn hash_with(params: &Params, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn is_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| hash.starts_with(prefix))
}
