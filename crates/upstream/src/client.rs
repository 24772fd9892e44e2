//! Core HTTP client for the backend service.
//!
//! [`BackendClient`] holds the connection configuration (base URL plus a
//! pooled [`reqwest::Client`]). Endpoint methods live in the sibling
//! modules ([`spots`](crate::spots), [`goshuin`](crate::goshuin), ...) as
//! further `impl` blocks; this module provides the shared request and
//! response plumbing they build on.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{detail_from_body, BackendError};

/// HTTP client for the goshuin backend service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client for a backend instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across components).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// Base HTTP URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- request plumbing (crate-internal) ----

    /// Build an authenticated request for `path` (which must start with
    /// `/`) with the caller's bearer token attached.
    pub(crate) fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(token)
    }

    /// Build an unauthenticated request for `path`.
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
    }

    /// Send a request and parse a successful JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request, asserting a success status and discarding the body.
    pub(crate) async fn send_no_content(
        &self,
        request: RequestBuilder,
    ) -> Result<(), BackendError> {
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    /// Send a request and return the raw successful response, for
    /// endpoints whose body is streamed through rather than parsed.
    pub(crate) async fn send_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, BackendError> {
        Self::ensure_success(request.send().await?).await
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`BackendError::Api`] carrying the
    /// status and the extracted `detail` message on failure.
    pub(crate) async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                detail: detail_from_body(status.as_u16(), &body),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = BackendClient::new("http://localhost:8000///");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
