//! The authenticated user's identity and cached balance.

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Signed-in user as returned by `POST /auth/login`.
///
/// The backend also sends a `status` field; it is not part of the session
/// and is dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub full_name: String,
    /// Cached balance. Non-negative by convention only; nothing enforces it.
    #[serde(default)]
    pub balance: Money,
}

impl UserSession {
    pub fn new(username: impl Into<String>, full_name: impl Into<String>, balance: Money) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            balance,
        }
    }
}
