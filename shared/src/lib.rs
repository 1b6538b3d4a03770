//! Shopfront Shared Library
//!
//! Wire types and the authentication error taxonomy shared between the
//! backend and its tests.

pub mod errors;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use models::{Order, Product};
pub use types::*;
