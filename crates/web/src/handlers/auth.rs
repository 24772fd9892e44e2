//! Handlers for the `/auth` resource (login, logout, current user).
//!
//! Login proxies the credentials to the backend and stores the returned
//! bearer token in the `accessToken` cookie; every other authenticated
//! route reads the token back from that cookie.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use goshuin_upstream::auth::UserProfile;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthToken, ACCESS_TOKEN_COOKIE};
use crate::state::AppState;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn access_token_cookie(value: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/login
///
/// Authenticate against the backend. On success the bearer token is set
/// as an HTTP-only cookie; invalid credentials pass the backend's status
/// and `detail` through.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, StatusCode)> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password must not be empty".into(),
        ));
    }

    let tokens = state
        .backend
        .login(input.username.trim(), &input.password)
        .await?;

    tracing::info!(username = %input.username.trim(), "User logged in");

    let jar = jar.add(access_token_cookie(tokens.access_token));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// POST /api/auth/logout
///
/// Clear the token cookie. No backend call is needed; the token simply
/// stops being replayed.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(access_token_cookie(String::new()));
    (jar, StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
///
/// The authenticated user's profile, as the backend reports it.
pub async fn me(
    token: AuthToken,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.backend.current_user(token.as_str()).await?;
    Ok(Json(profile))
}
