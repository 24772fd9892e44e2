//! Route definitions for spots, their image galleries, and record
//! creation.
//!
//! Mounted at `/spots` in the API route tree.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{goshuin, spot_images, spots};
use crate::state::AppState;

/// Spot routes mounted at `/spots`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{spot_id}                         -> get_by_id
/// PATCH  /{spot_id}                         -> update
/// DELETE /{spot_id}                         -> delete
/// POST   /{spot_id}/goshuin                 -> goshuin::create
/// GET    /{spot_id}/images                  -> spot_images::list
/// POST   /{spot_id}/images/uploads          -> spot_images::create_upload
/// POST   /{spot_id}/images/reorder          -> spot_images::reorder
/// PATCH  /{spot_id}/images/{image_id}       -> spot_images::update_metadata
/// DELETE /{spot_id}/images/{image_id}       -> spot_images::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spots::list).post(spots::create))
        .route(
            "/{spot_id}",
            get(spots::get_by_id)
                .patch(spots::update)
                .delete(spots::delete),
        )
        .route("/{spot_id}/goshuin", post(goshuin::create))
        .route("/{spot_id}/images", get(spot_images::list))
        .route("/{spot_id}/images/uploads", post(spot_images::create_upload))
        .route("/{spot_id}/images/reorder", post(spot_images::reorder))
        .route(
            "/{spot_id}/images/{image_id}",
            patch(spot_images::update_metadata).delete(spot_images::delete),
        )
}
