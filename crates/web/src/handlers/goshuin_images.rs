//! Handlers for a goshuin record's image gallery.
//!
//! Same manager-mediated flow as the spot gallery, minus the primary
//! flag: goshuin images only carry a type and a display order.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use goshuin_core::goshuin::{GoshuinImage, GoshuinImageUpdate};
use goshuin_core::spot::ImageUploadSlot;
use goshuin_core::EntityId;

use crate::error::AppResult;
use crate::galleries::SharedGallery;
use crate::handlers::spot_images::ReorderRequest;
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// Fetch the gallery manager for a record, creating it from the backend's
/// current image list when this is the first touch.
async fn load_gallery(
    state: &AppState,
    token: &str,
    record_id: EntityId,
) -> AppResult<SharedGallery<GoshuinImage>> {
    if let Some(gallery) = state.galleries.goshuin_gallery(record_id).await {
        return Ok(gallery);
    }
    let images = state.backend.list_goshuin_images(token, record_id).await?;
    Ok(state.galleries.sync_goshuin_gallery(record_id, images).await)
}

/// GET /api/goshuin/{record_id}/images
pub async fn list(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
) -> AppResult<Json<Vec<GoshuinImage>>> {
    let images = state
        .backend
        .list_goshuin_images(token.as_str(), record_id)
        .await?;
    let gallery = state
        .galleries
        .sync_goshuin_gallery(record_id, images)
        .await;
    let manager = gallery.lock().await;
    Ok(Json(manager.images().to_vec()))
}

/// POST /api/goshuin/{record_id}/images/uploads
pub async fn create_upload(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
) -> AppResult<(StatusCode, Json<ImageUploadSlot>)> {
    let slot = state
        .backend
        .create_goshuin_image_upload(token.as_str(), record_id)
        .await?;
    state.galleries.evict_goshuin_gallery(record_id).await;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// POST /api/goshuin/{record_id}/images/reorder
pub async fn reorder(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<GoshuinImage>>> {
    let gallery = load_gallery(&state, token.as_str(), record_id).await?;

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
        .reorder_goshuin_images(token.as_str(), record_id, &input.image_ids)
        .await;

    let mut manager = gallery.lock().await;
    match result {
        Ok(canonical) => {
            manager.commit_reorder(canonical)?;
            tracing::debug!(record_id = %record_id, count = manager.len(), "Gallery reordered");
            Ok(Json(manager.images().to_vec()))
        }
        Err(err) => {
            manager.abort();
            Err(err.into())
        }
    }
}

/// PATCH /api/goshuin/{record_id}/images/{image_id}
pub async fn update_metadata(
    token: AuthToken,
    State(state): State<AppState>,
    Path((record_id, image_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<GoshuinImageUpdate>,
) -> AppResult<Json<GoshuinImage>> {
    let gallery = load_gallery(&state, token.as_str(), record_id).await?;
    gallery.lock().await.begin()?;

    let result = state
        .backend
        .update_goshuin_image(token.as_str(), record_id, image_id, &input)
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

/// DELETE /api/goshuin/{record_id}/images/{image_id}
pub async fn delete(
    token: AuthToken,
    State(state): State<AppState>,
    Path((record_id, image_id)): Path<(EntityId, EntityId)>,
) -> AppResult<StatusCode> {
    let gallery = load_gallery(&state, token.as_str(), record_id).await?;
    gallery.lock().await.begin()?;

    let result = state
        .backend
        .delete_goshuin_image(token.as_str(), record_id, image_id)
        .await;

    let mut manager = gallery.lock().await;
    match result {
        Ok(()) => {
            manager.commit_delete(image_id)?;
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            manager.abort();
            Err(err.into())
        }
    }
}
