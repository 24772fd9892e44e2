//! Route definitions for goshuin records and their image galleries.
//!
//! Mounted at `/goshuin` in the API route tree. Record creation lives
//! under the owning spot (see [`super::spots`]).

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{goshuin, goshuin_images};
use crate::state::AppState;

/// Goshuin routes mounted at `/goshuin`.
///
/// ```text
/// GET    /                                    -> list
/// GET    /{record_id}                         -> get_by_id
/// PATCH  /{record_id}                         -> update
/// DELETE /{record_id}                         -> delete
/// GET    /{record_id}/images                  -> goshuin_images::list
/// POST   /{record_id}/images/uploads          -> goshuin_images::create_upload
/// POST   /{record_id}/images/reorder          -> goshuin_images::reorder
/// PATCH  /{record_id}/images/{image_id}       -> goshuin_images::update_metadata
/// DELETE /{record_id}/images/{image_id}       -> goshuin_images::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goshuin::list))
        .route(
            "/{record_id}",
            get(goshuin::get_by_id)
                .patch(goshuin::update)
                .delete(goshuin::delete),
        )
        .route("/{record_id}/images", get(goshuin_images::list))
        .route(
            "/{record_id}/images/uploads",
            post(goshuin_images::create_upload),
        )
        .route(
            "/{record_id}/images/reorder",
            post(goshuin_images::reorder),
        )
        .route(
            "/{record_id}/images/{image_id}",
            patch(goshuin_images::update_metadata).delete(goshuin_images::delete),
        )
}
