//! Handlers for the `/goshuin` resource.
//!
//! Goshuin records live under their spot for creation (a record documents
//! a visit to one spot) and top-level for everything else, mirroring the
//! backend's route shape.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use goshuin_core::goshuin::{CreateGoshuin, GoshuinRecord, UpdateGoshuin};
use goshuin_core::pagination::{clamp_page, clamp_size, Paginated};
use goshuin_core::EntityId;
use goshuin_upstream::goshuin::{GoshuinListQuery, SortOrder};

use crate::error::AppResult;
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// Query parameters for `GET /api/goshuin`.
#[derive(Debug, Deserialize)]
pub struct GoshuinListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub spot_id: Option<EntityId>,
}

/// GET /api/goshuin
pub async fn list(
    token: AuthToken,
    State(state): State<AppState>,
    Query(params): Query<GoshuinListParams>,
) -> AppResult<Json<Paginated<GoshuinRecord>>> {
    let query = GoshuinListQuery {
        page: clamp_page(params.page),
        size: clamp_size(params.size),
        sort_order: params.sort_order,
        spot_id: params.spot_id,
    };
    let page = state.backend.list_goshuin(token.as_str(), &query).await?;
    Ok(Json(page))
}

/// POST /api/spots/{spot_id}/goshuin
pub async fn create(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
    Json(input): Json<CreateGoshuin>,
) -> AppResult<(StatusCode, Json<GoshuinRecord>)> {
    input.validate_payload(Utc::now().date_naive())?;
    let record = state
        .backend
        .create_goshuin(token.as_str(), spot_id, &input)
        .await?;

    tracing::info!(record_id = %record.id, spot_id = %spot_id, "Goshuin record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/goshuin/{record_id}
pub async fn get_by_id(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
) -> AppResult<Json<GoshuinRecord>> {
    let record = state.backend.get_goshuin(token.as_str(), record_id).await?;
    Ok(Json(record))
}

/// PATCH /api/goshuin/{record_id}
pub async fn update(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
    Json(input): Json<UpdateGoshuin>,
) -> AppResult<Json<GoshuinRecord>> {
    input.validate_payload(Utc::now().date_naive())?;
    let record = state
        .backend
        .update_goshuin(token.as_str(), record_id, &input)
        .await?;
    Ok(Json(record))
}

/// DELETE /api/goshuin/{record_id}
pub async fn delete(
    token: AuthToken,
    State(state): State<AppState>,
    Path(record_id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state
        .backend
        .delete_goshuin(token.as_str(), record_id)
        .await?;
    state.galleries.evict_goshuin_gallery(record_id).await;

    tracing::info!(record_id = %record_id, "Goshuin record deleted");
    Ok(StatusCode::NO_CONTENT)
}
