//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the auth components, the store and the HTTP layer.

pub mod auth;
pub mod order;

pub use auth::AuthService;
pub use order::OrderService;
