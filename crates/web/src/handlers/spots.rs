//! Handlers for the `/spots` resource.
//!
//! Spots are owned by the backend; these handlers validate payloads,
//! clamp pagination, and proxy. The list endpoint carries the search
//! filters that the dashboard's URL query parameters mirror.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use goshuin_core::pagination::{clamp_page, clamp_size, Paginated};
use goshuin_core::spot::{CreateSpot, Spot, SpotType, UpdateSpot};
use goshuin_core::EntityId;
use goshuin_upstream::spots::SpotListQuery;

use crate::error::AppResult;
use crate::handlers::validate_payload;
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// Query parameters for `GET /api/spots`.
#[derive(Debug, Deserialize)]
pub struct SpotListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub prefecture: Option<String>,
    pub category: Option<SpotType>,
    pub keyword: Option<String>,
}

impl SpotListParams {
    fn into_query(self) -> SpotListQuery {
        SpotListQuery {
            page: clamp_page(self.page),
            size: clamp_size(self.size),
            prefecture: self.prefecture.filter(|s| !s.is_empty()),
            category: self.category,
            keyword: self.keyword.filter(|s| !s.is_empty()),
        }
    }
}

/// GET /api/spots
pub async fn list(
    token: AuthToken,
    State(state): State<AppState>,
    Query(params): Query<SpotListParams>,
) -> AppResult<Json<Paginated<Spot>>> {
    let page = state
        .backend
        .list_spots(token.as_str(), &params.into_query())
        .await?;
    Ok(Json(page))
}

/// POST /api/spots
pub async fn create(
    token: AuthToken,
    State(state): State<AppState>,
    Json(input): Json<CreateSpot>,
) -> AppResult<(StatusCode, Json<Spot>)> {
    validate_payload(&input)?;
    let spot = state.backend.create_spot(token.as_str(), &input).await?;

    tracing::info!(spot_id = %spot.id, name = %spot.name, "Spot created");
    Ok((StatusCode::CREATED, Json(spot)))
}

/// GET /api/spots/{spot_id}
pub async fn get_by_id(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
) -> AppResult<Json<Spot>> {
    let spot = state.backend.get_spot(token.as_str(), spot_id).await?;
    Ok(Json(spot))
}

/// PATCH /api/spots/{spot_id}
pub async fn update(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
    Json(input): Json<UpdateSpot>,
) -> AppResult<Json<Spot>> {
    validate_payload(&input)?;
    let spot = state
        .backend
        .update_spot(token.as_str(), spot_id, &input)
        .await?;
    Ok(Json(spot))
}

/// DELETE /api/spots/{spot_id}
///
/// Deleting a spot cascades to its gallery backend-side, so the local
/// gallery manager is dropped as well.
pub async fn delete(
    token: AuthToken,
    State(state): State<AppState>,
    Path(spot_id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state.backend.delete_spot(token.as_str(), spot_id).await?;
    state.galleries.evict_spot_gallery(spot_id).await;

    tracing::info!(spot_id = %spot_id, "Spot deleted");
    Ok(StatusCode::NO_CONTENT)
}
