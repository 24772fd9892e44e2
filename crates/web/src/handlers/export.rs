//! Handlers for data export downloads.
//!
//! Export bodies are generated backend-side; these handlers stream them
//! through with a fresh timestamped attachment filename.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;

use goshuin_core::export::ExportFormat;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// GET /api/export/json
pub async fn export_json(
    token: AuthToken,
    State(state): State<AppState>,
) -> AppResult<Response> {
    proxy_export(&state, token.as_str(), ExportFormat::Json).await
}

/// GET /api/export/csv
pub async fn export_csv(
    token: AuthToken,
    State(state): State<AppState>,
) -> AppResult<Response> {
    proxy_export(&state, token.as_str(), ExportFormat::Csv).await
}

async fn proxy_export(
    state: &AppState,
    token: &str,
    format: ExportFormat,
) -> AppResult<Response> {
    let upstream = state.backend.download_export(token, format).await?;
    let filename = format.attachment_filename(Utc::now());

    tracing::info!(filename = %filename, "Export download started");

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, format.content_type())
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|err| AppError::InternalError(format!("failed to build response: {err}")))
}
