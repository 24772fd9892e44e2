use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use goshuin_core::error::CoreError;
use goshuin_core::gallery::GalleryError;
use goshuin_upstream::BackendError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`GalleryError`] for gallery
/// state-machine violations, and [`BackendError`] for upstream failures.
/// Implements [`IntoResponse`] to produce consistent `{detail, code}` JSON
/// error bodies; upstream API errors pass their status and `detail`
/// through unchanged, the way the dashboard's proxy routes always have.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `goshuin_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A gallery state-machine violation.
    #[error(transparent)]
    Gallery(#[from] GalleryError),

    /// A failure talking to the backend service.
    #[error(transparent)]
    Upstream(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Gallery state machine ---
            AppError::Gallery(gallery) => classify_gallery_error(gallery),

            // --- Upstream failures ---
            AppError::Upstream(upstream) => classify_upstream_error(upstream),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "detail": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a gallery state-machine error into an HTTP status, error code,
/// and message.
///
/// - `Busy` maps to 409: the client double-submitted while a mutation was
///   still outstanding.
/// - Draft problems (duplicates, wrong id set) map to 400.
/// - A canonical response the manager refuses means the backend and the
///   local state disagree; that is a 500 worth logging.
fn classify_gallery_error(err: &GalleryError) -> (StatusCode, &'static str, String) {
    match err {
        GalleryError::Busy => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Another gallery operation is already in progress".to_string(),
        ),
        GalleryError::UnknownImage(id) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Image {id} is not part of this gallery"),
        ),
        GalleryError::DuplicateImage(_) | GalleryError::IdSetMismatch => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        GalleryError::NotPending | GalleryError::OrderNotDense => {
            tracing::error!(error = %err, "Gallery state error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify an upstream error into an HTTP status, error code, and message.
///
/// API errors keep the backend's status and `detail`; transport failures
/// (connection refused, timeout) map to 502 with a sanitized message.
fn classify_upstream_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Api { status, detail } => {
            let status_code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            let code = match status_code {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "VALIDATION_ERROR",
                StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
                StatusCode::FORBIDDEN => "FORBIDDEN",
                StatusCode::NOT_FOUND => "NOT_FOUND",
                StatusCode::CONFLICT => "CONFLICT",
                _ => "UPSTREAM_ERROR",
            };
            (status_code, code, detail.clone())
        }
        BackendError::Request(inner) => {
            tracing::error!(error = %inner, "Backend request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "The backend service could not be reached".to_string(),
            )
        }
    }
}
