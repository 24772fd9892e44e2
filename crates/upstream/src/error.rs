//! Error type for backend API calls.

use serde::Deserialize;

/// Errors from the backend REST client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response's `detail` field.
        detail: String,
    },
}

impl BackendError {
    /// Status code of an API error, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Request(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Shape of the backend's error body. `detail` is either a plain string
/// or, for validation failures, a list of objects carrying `msg`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

/// Extract a human-readable message from an error response body, falling
/// back to the raw body (or the status) when nothing parses.
pub(crate) fn detail_from_body(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.detail {
            match detail {
                serde_json::Value::String(message) => return message,
                serde_json::Value::Array(items) => {
                    let messages: Vec<String> = items
                        .iter()
                        .filter_map(|item| {
                            item.get("msg")
                                .or_else(|| item.get("detail"))
                                .and_then(|msg| msg.as_str())
                                .map(str::to_string)
                        })
                        .collect();
                    if !messages.is_empty() {
                        return messages.join(", ");
                    }
                }
                _ => {}
            }
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {status}")
    } else {
        trimmed.to_string()
    }
}
