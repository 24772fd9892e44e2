//! Cookie-based authentication extractors for Axum handlers.
//!
//! The login flow stores the backend's bearer token in the `accessToken`
//! cookie. Handlers pick it up through one of two extractors:
//!
//! - [`AuthToken`] reads the cookie and nothing else. Proxy handlers use
//!   it; the backend validates the token on every forwarded request
//!   anyway.
//! - [`AuthUser`] additionally resolves the token to a user id via the
//!   backend's `/users/me`, for handlers that key state by user (search
//!   history, saved searches). An invalid or expired token fails here
//!   with 401, which the browser tier turns into a login redirect.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use goshuin_core::error::CoreError;
use goshuin_core::EntityId;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the backend bearer token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// The raw bearer token from the `accessToken` cookie.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(ACCESS_TOKEN_COOKIE).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authentication token missing".into(),
            ))
        })?;
        Ok(AuthToken(token.value().to_string()))
    }
}

/// Authenticated user resolved against the backend.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's backend id.
    pub user_id: EntityId,
    /// The bearer token, for follow-up backend calls.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthToken(token) = AuthToken::from_request_parts(parts, state).await?;

        let profile = state.backend.current_user(&token).await.map_err(|err| {
            if err.is_unauthorized() {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            } else {
                AppError::Upstream(err)
            }
        })?;

        Ok(AuthUser {
            user_id: profile.id,
            token,
        })
    }
}
