//! Request bodies for the `/auth/*` endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "full name must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// `POST /auth/reset-password` reuses the login body shape.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "new password must not be empty"))]
    pub password: String,
}

/// Body of a successful register/reset response. Both fields are optional:
/// the backend only promises a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Run derive-based validation and map failures into [`CoreError`].
pub fn check<T: Validate>(request: &T) -> Result<(), CoreError> {
    request.validate().map_err(CoreError::from)
}
