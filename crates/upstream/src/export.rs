//! Export download endpoints.
//!
//! Export bodies are generated backend-side and can be large, so they are
//! handed back as raw [`reqwest::Response`]s for the web tier to stream
//! through instead of buffering.

use reqwest::{Method, Response};

use goshuin_core::export::ExportFormat;

use crate::client::BackendClient;
use crate::error::BackendError;

impl BackendClient {
    /// Download the user's data export in the given format. The returned
    /// response has already been checked for a success status.
    pub async fn download_export(
        &self,
        token: &str,
        format: ExportFormat,
    ) -> Result<Response, BackendError> {
        let path = format!("/api/export/{}", format.extension());
        let request = self.authed(Method::GET, &path, token);
        self.send_raw(request).await
    }
}
