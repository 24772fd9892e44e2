//! Health check handler.

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Liveness probe. Reports the crate version so deploys are identifiable
/// from the outside.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
