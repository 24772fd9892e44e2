//! Route definitions for export downloads.
//!
//! Mounted at `/export` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Export routes mounted at `/export`.
///
/// ```text
/// GET /json    -> export_json
/// GET /csv     -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/json", get(export::export_json))
        .route("/csv", get(export::export_csv))
}
