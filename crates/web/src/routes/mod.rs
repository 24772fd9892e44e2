pub mod auth;
pub mod export;
pub mod goshuin;
pub mod health;
pub mod prefectures;
pub mod search;
pub mod spots;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public, sets cookie)
/// /auth/logout                                 logout (clears cookie)
/// /auth/me                                     current user
///
/// /spots                                       list, create
/// /spots/{spot_id}                             get, update, delete
/// /spots/{spot_id}/goshuin                     create record (POST)
/// /spots/{spot_id}/images                      list
/// /spots/{spot_id}/images/uploads              initiate upload (POST)
/// /spots/{spot_id}/images/reorder              reorder (POST)
/// /spots/{spot_id}/images/{image_id}           update, delete
///
/// /goshuin                                     list
/// /goshuin/{record_id}                         get, update, delete
/// /goshuin/{record_id}/images                  list
/// /goshuin/{record_id}/images/uploads          initiate upload (POST)
/// /goshuin/{record_id}/images/reorder          reorder (POST)
/// /goshuin/{record_id}/images/{image_id}       update, delete
///
/// /search/history                              record, list, clear
/// /search/saved                                create, list
/// /search/saved/{id}                           delete
///
/// /prefectures/stats                           per-prefecture counts
/// /prefectures/stats/grouped                   grouped by hiragana
/// /prefectures/{prefecture}/spots              all spots (map view)
///
/// /export/json                                 JSON export download
/// /export/csv                                  CSV export download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/spots", spots::router())
        .nest("/goshuin", goshuin::router())
        .nest("/search", search::router())
        .nest("/prefectures", prefectures::router())
        .nest("/export", export::router())
}
