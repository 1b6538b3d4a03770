//! Configuration management for the Shopfront backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: SHOP__)
//! 4. The plain `JWT_SECRET` and `DATABASE_URL` variables
//!
//! The token signing secret has no default. A missing secret aborts startup.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Minimum signing secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Startup configuration errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("token signing secret is not configured (set JWT_SECRET or SHOP__JWT__SECRET)")]
    MissingSigningSecret,

    #[error("token signing secret must be at least {MIN_PRODUCTION_SECRET_LEN} bytes in production")]
    WeakSigningSecret,

    #[error("database url is not configured (set DATABASE_URL or SHOP__DATABASE__URL)")]
    MissingDatabaseUrl,

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// Application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Deserialize)]
pub struct JwtConfig {
    /// Optional at deserialization time so a missing secret surfaces as
    /// [`ConfigError::MissingSigningSecret`] rather than a serde message.
    #[serde(default)]
    pub secret: Option<SecretString>,
    pub access_token_expiry_secs: i64,
}

/// Argon2id work factor for password hashing
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        // OWASP baseline for Argon2id
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with SHOP__ prefix
    /// 4. `JWT_SECRET` / `DATABASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);
        let password = PasswordConfig::default();

        let config = config::Config::builder()
            // Defaults. There is deliberately none for jwt.secret.
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.access_token_expiry_secs", 900)?
            .set_default("password.memory_kib", password.memory_kib)?
            .set_default("password.iterations", password.iterations)?
            .set_default("password.parallelism", password.parallelism)?
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (SHOP__ prefix)
            // e.g., SHOP__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("SHOP").separator("__"))
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate(Self::is_production())?;
        Ok(config)
    }

    /// Check the invariants startup depends on
    pub fn validate(&self, production: bool) -> Result<(), ConfigError> {
        let secret = self.signing_secret()?;
        if production && secret.expose_secret().len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::WeakSigningSecret);
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        if self.jwt.access_token_expiry_secs <= 0 {
            return Err(ConfigError::Invalid(
                "jwt.access_token_expiry_secs must be positive".to_string(),
            ));
        }

        if self.password.iterations == 0 || self.password.parallelism == 0 {
            return Err(ConfigError::Invalid(
                "password.iterations and password.parallelism must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// The token signing secret, or an error if it is absent or empty
    pub fn signing_secret(&self) -> Result<&SecretString, ConfigError> {
        match &self.jwt.secret {
            Some(secret) if !secret.expose_secret().is_empty() => Ok(secret),
            _ => Err(ConfigError::MissingSigningSecret),
        }
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
