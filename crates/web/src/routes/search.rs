//! Route definitions for search history and saved searches.
//!
//! Mounted at `/search` in the API route tree.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Search routes mounted at `/search`.
///
/// ```text
/// POST   /history       -> record_history
/// GET    /history       -> list_history
/// DELETE /history       -> clear_history
/// POST   /saved         -> create_saved_search
/// GET    /saved         -> list_saved_searches
/// DELETE /saved/{id}    -> delete_saved_search
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/history",
            get(search::list_history)
                .post(search::record_history)
                .delete(search::clear_history),
        )
        .route(
            "/saved",
            get(search::list_saved_searches).post(search::create_saved_search),
        )
        .route("/saved/{id}", delete(search::delete_saved_search))
}
