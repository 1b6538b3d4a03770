//! Authentication module
//!
//! Argon2id/bcrypt credential checks at login, HS256 access tokens, and
//! the middleware that guards protected routes.

mod credentials;
mod identity;
mod middleware;
mod token;

pub use credentials::CredentialVerifier;
pub use identity::IdentityClaim;
pub use middleware::{require_auth, CurrentIdentity};
pub use token::{TokenClaims, TokenService};
