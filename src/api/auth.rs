//! Authentication endpoints
//!
//! Login and logout bypass the retry-once wrapper on purpose: a 401 here is
//! a credential problem, not an expired session, and must surface to the
//! caller as a plain HTTP error.

use reqwest::Method;
use validator::Validate;

use crate::client::{envelope, ApiClient};
use crate::error::ApiResult;
use crate::models::{AuthTokens, LoginRequest, User};
use crate::session::Session;

impl ApiClient {
    /// Exchange credentials for a session. On success the session store is
    /// populated and persisted; subsequent requests carry the new token.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<User> {
        request.validate()?;

        let body = serde_json::to_value(&request)?;
        let response = self
            .execute_public(Method::POST, "/auth/login", Some(&body))
            .await?;
        let tokens: AuthTokens = envelope::decode_payload(response)?;

        let user = tokens.user.clone();
        self.session().set_session(Session {
            user: tokens.user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })?;

        tracing::info!(email = %user.email, "Logged in");
        Ok(user)
    }

    /// Best-effort server-side invalidation, then local teardown. The local
    /// session is cleared even when the server call fails.
    pub async fn logout(&self) {
        if let Err(e) = self
            .execute_public(Method::POST, "/auth/logout", None)
            .await
        {
            tracing::debug!(error = %e, "Server-side logout failed, clearing locally");
        }
        self.session().clear();
        tracing::info!("Logged out");
    }
}
