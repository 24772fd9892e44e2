//! Authentication endpoints: login and current-user lookup.
//!
//! The backend issues JWT bearer tokens from an OAuth2 password form
//! (`POST /auth/jwt/login`). Token validation happens backend-side; the
//! dashboard only stores the token and replays it per request.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use goshuin_core::EntityId;

use crate::client::BackendClient;
use crate::error::BackendError;

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
}

/// The authenticated user, as reported by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: EntityId,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl BackendClient {
    /// Authenticate with username + password.
    ///
    /// Sends the credentials as an OAuth2 password form. Invalid
    /// credentials surface as a 400 API error with the backend's `detail`
    /// message.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, BackendError> {
        let form = [("username", username), ("password", password)];
        let request = self.public(Method::POST, "/auth/jwt/login").form(&form);
        let tokens: AuthTokens = self.send_json(request).await?;

        tracing::debug!(username, "Backend login succeeded");
        Ok(tokens)
    }

    /// Fetch the profile of the token's owner. A 401 means the token is
    /// missing, expired, or revoked.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, BackendError> {
        let request = self.authed(Method::GET, "/users/me", token);
        self.send_json(request).await
    }
}
