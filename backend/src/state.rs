//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: signing keys, the password
//!    work factor and the dummy hash are derived once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::{CredentialVerifier, TokenService};
use crate::config::AppConfig;
use crate::repositories::Store;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
///
/// # Performance
///
/// - `store`: trait object behind Arc, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `tokens` / `credentials`: keys and parameters wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Data access collaborator
    pub store: Arc<dyn Store>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token service holding the pre-computed signing keys
    pub tokens: TokenService,
    /// Password verifier with the configured work factor
    pub credentials: CredentialVerifier,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails when the signing secret is missing or the password work
    /// factor is invalid. Call once at startup.
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Result<Self> {
        let tokens = TokenService::new(
            config.signing_secret()?,
            config.jwt.access_token_expiry_secs,
        )?;
        let credentials = CredentialVerifier::new(config.password)?;

        Ok(Self {
            store,
            config: Arc::new(config),
            tokens,
            credentials,
            metrics: None,
        })
    }

    /// Attach the Prometheus handle served at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Get a reference to the credential verifier
    #[inline]
    pub fn credentials(&self) -> &CredentialVerifier {
        &self.credentials
    }
}

/// State over `store` with a fixed test secret and the cheapest work factor
#[cfg(test)]
pub(crate) fn test_state(store: crate::repositories::MemoryStore) -> AppState {
    use crate::config::{DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};
    use secrecy::SecretString;

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "memory".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: Some(SecretString::new("test-secret-key-for-testing-only-32chars".to_string())),
            access_token_expiry_secs: 900,
        },
        password: PasswordConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
    };

    AppState::new(Arc::new(store), config).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::IdentityClaim;
    use crate::repositories::MemoryStore;

    #[test]
    fn test_state_clone_is_cheap() {
        let state = test_state(MemoryStore::new());

        // Clone should be O(1) - just Arc increments
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }

    #[test]
    fn test_token_service_is_precomputed() {
        let state = test_state(MemoryStore::new());

        let token = state.tokens().issue(IdentityClaim { user_id: 1 }).unwrap();
        assert!(!token.is_empty());
        assert_eq!(state.tokens().ttl_secs(), 900);
    }

    #[test]
    fn test_missing_secret_fails_construction() {
        let config = test_config_without_secret();

        assert!(AppState::new(Arc::new(MemoryStore::new()), config).is_err());
    }

    fn test_config_without_secret() -> AppConfig {
        use crate::config::{DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};

        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "memory".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: None,
                access_token_expiry_secs: 900,
            },
            password: PasswordConfig::default(),
        }
    }
}
