//! Handlers for prefecture statistics and per-prefecture spot listings.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use goshuin_core::pagination::{InfiniteList, MAX_PAGE_SIZE};
use goshuin_core::prefectures::{group_by_hiragana, GroupedPrefectureStats, PrefectureStatsResponse};
use goshuin_core::spot::{Spot, SpotType};
use goshuin_upstream::spots::SpotListQuery;

use crate::error::AppResult;
use crate::middleware::auth::AuthToken;
use crate::state::AppState;

/// GET /api/prefectures/stats
pub async fn stats(
    token: AuthToken,
    State(state): State<AppState>,
) -> AppResult<Json<PrefectureStatsResponse>> {
    let stats = state.backend.prefecture_stats(token.as_str()).await?;
    Ok(Json(stats))
}

/// GET /api/prefectures/stats/grouped
///
/// Statistics organized by hiragana group, the way the prefecture index
/// page renders them.
pub async fn stats_grouped(
    token: AuthToken,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GroupedPrefectureStats>>> {
    let stats = state.backend.prefecture_stats(token.as_str()).await?;
    Ok(Json(group_by_hiragana(&stats.by_prefecture)))
}

/// Optional narrowing filters for the per-prefecture spot listing.
#[derive(Debug, Deserialize)]
pub struct PrefectureSpotsParams {
    pub category: Option<SpotType>,
    pub keyword: Option<String>,
}

/// GET /api/prefectures/{prefecture}/spots
///
/// Every spot in a prefecture, for the map view. The backend only serves
/// pages, so the infinite list controller walks them until exhausted --
/// one request in flight at a time, stopping the moment
/// `items.len() == total`.
pub async fn spots_by_prefecture(
    token: AuthToken,
    State(state): State<AppState>,
    Path(prefecture): Path<String>,
    Query(params): Query<PrefectureSpotsParams>,
) -> AppResult<Json<Vec<Spot>>> {
    let mut list = InfiniteList::empty(MAX_PAGE_SIZE);

    while let Some(request) = list.next_request() {
        let query = SpotListQuery {
            page: request.page,
            size: request.size,
            prefecture: Some(prefecture.clone()),
            category: params.category,
            keyword: params.keyword.clone().filter(|s| !s.is_empty()),
        };
        match state.backend.list_spots(token.as_str(), &query).await {
            Ok(page) => list.complete(page),
            Err(err) => {
                list.fail(err.to_string());
                return Err(err.into());
            }
        }
    }

    tracing::debug!(
        prefecture = %prefecture,
        count = list.len(),
        "Prefecture spots collected",
    );
    Ok(Json(list.into_items()))
}
