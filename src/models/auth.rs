//! Authentication models for the FXDesk client

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::User;

/// Credentials for the login exchange
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be an email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Tokens and identity returned by a successful login
#[derive(Debug, Deserialize, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Refresh exchange request body
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Canonical refresh exchange response.
///
/// The backend always returns a fresh access token; the refresh token is only
/// present when the server rotated it, and the user only when the identity
/// record changed.
#[derive(Debug, Deserialize, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}
