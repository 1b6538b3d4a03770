//! The verified identity of a caller

use serde::{Deserialize, Serialize};

/// Identity established by a successful login or a valid access token
///
/// Carried in request extensions for the rest of the pipeline once the
/// auth middleware has accepted the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub user_id: i32,
}
