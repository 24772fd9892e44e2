//! Handlers for a spot's image gallery.
//!
//! Mutations run through the spot's [`GalleryManager`]: the manager is
//! marked pending, the backend call is made, and the server's canonical
//! result is committed -- or the mutation is aborted, leaving local state
//! untouched and surfacing the backend's `detail` message. A second
//! mutation for the same gallery while one is outstanding gets a 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use goshuin_core::spot::{ImageUploadSlot, SpotImage, SpotImageUpdate};
use goshuin_core::EntityId;

use crate::error::AppResult;
use crate::galleries::SharedGallery;
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// Request body for `POST .../images/reorder`: the full ordered id list.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub image_ids: Vec<EntityId>,
}

/// Fetch the gallery manager for a spot, creating it from the backend's
/// current image list when this is the first touch.
async fn load_gallery(
    state: &AppState,
    token: &str,
    spot_id: EntityId,
) -> AppResult<SharedGallery<SpotImage>> {
    if let Some(gallery) = state.galleries.spot_gallery(spot_id).await {
        return Ok(gallery);
    }
    let images = state.backend.list_spot_images(token, spot_id).await?;
    Ok(state.galleries.sync_spot_gallery(spot_id, images).await)
}

/// GET /api/spots/{spot_id}/images
///
/// Lists the gallery in display order and re-syncs the local manager with
/// the backend's canonical state.
pub async fn list(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
) -> AppResult<Json<Vec<SpotImage>>> {
    let images = state
        .backend
        .list_spot_images(token.as_str(), spot_id)
        .await?;
    let gallery = state
        .galleries
        .sync_spot_gallery(spot_id, images)
        .await;
    let manager = gallery.lock().await;
    Ok(Json(manager.images().to_vec()))
}

/// POST /api/spots/{spot_id}/images/uploads
///
/// Initiate an upload. The backend appends the new image record, so the
/// cached manager is dropped and rebuilt on the next listing.
pub async fn create_upload(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
) -> AppResult<(StatusCode, Json<ImageUploadSlot>)> {
    let slot = state
        .backend
        .create_spot_image_upload(token.as_str(), spot_id)
        .await?;
    state.galleries.evict_spot_gallery(spot_id).await;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// POST /api/spots/{spot_id}/images/reorder
///
/// Sends the full ordered id list to the backend and replaces local state
/// with the canonical response. The draft is validated locally first, so
/// duplicate or foreign ids fail fast with 400.
pub async fn reorder(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<SpotImage>>> {
    let gallery = load_gallery(&state, token.as_str(), spot_id).await?;

    {
        let mut manager = gallery.lock().await;
        manager.begin()?;
        if let Err(err) = manager.validate_draft(&input.image_ids) {
            manager.abort();
            return Err(err.into());
        }
    }

    let result = state
        .backend
        .reorder_spot_images(token.as_str(), spot_id, &input.image_ids)
        .await;

    let mut manager = gallery.lock().await;
    match result {
        Ok(canonical) => {
            manager.commit_reorder(canonical)?;
            tracing::debug!(spot_id = %spot_id, count = manager.len(), "Gallery reordered");
            Ok(Json(manager.images().to_vec()))
        }
        Err(err) => {
            manager.abort();
            Err(err.into())
        }
    }
}

/// PATCH /api/spots/{spot_id}/images/{image_id}
///
/// Edit image metadata (type, primary flag). On success the single record
/// is replaced and the list re-sorted; promoting a primary demotes all
/// siblings so exactly one image stays primary.
pub async fn update_metadata(
    token: AuthToken,
    State(state): State<AppState>,
    Path((spot_id, image_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<SpotImageUpdate>,
) -> AppResult<Json<SpotImage>> {
    let gallery = load_gallery(&state, token.as_str(), spot_id).await?;
    gallery.lock().await.begin()?;

    let result = state
        .backend
        .update_spot_image(token.as_str(), spot_id, image_id, &input)
        .await;

    let mut manager = gallery.lock().await;
    match result {
        Ok(updated) => {
            manager.commit_metadata(updated.clone())?;
            Ok(Json(updated))
        }
        Err(err) => {
            manager.abort();
            Err(err.into())
        }
    }
}

/// DELETE /api/spots/{spot_id}/images/{image_id}
///
/// Deletes the image backend-side and removes exactly that one id from
/// the local list.
pub async fn delete(
    token: AuthToken,
    State(state): State<AppState>,
    Path((spot_id, image_id)): Path<(EntityId, EntityId)>,
) -> AppResult<StatusCode> {
    let gallery = load_gallery(&state, token.as_str(), spot_id).await?;
    gallery.lock().await.begin()?;

    let result = state
        .backend
        .delete_spot_image(token.as_str(), spot_id, image_id)
        .await;

    let mut manager = gallery.lock().await;
    match result {
        Ok(()) => {
            manager.commit_delete(image_id)?;
            tracing::debug!(spot_id = %spot_id, image_id = %image_id, "Gallery image deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            manager.abort();
            Err(err.into())
        }
    }
}
