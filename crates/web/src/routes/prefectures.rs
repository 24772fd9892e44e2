//! Route definitions for prefecture statistics.
//!
//! Mounted at `/prefectures` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::prefectures;
use crate::state::AppState;

/// Prefecture routes mounted at `/prefectures`.
///
/// ```text
/// GET /stats                    -> stats
/// GET /stats/grouped            -> stats_grouped
/// GET /{prefecture}/spots       -> spots_by_prefecture
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(prefectures::stats))
        .route("/stats/grouped", get(prefectures::stats_grouped))
        .route("/{prefecture}/spots", get(prefectures::spots_by_prefecture))
}
