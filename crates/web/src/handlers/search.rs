//! Handlers for search history and saved searches.
//!
//! Both are persisted per authenticated user in the in-memory
//! [`SearchStore`](crate::search_store::SearchStore): the last ten
//! non-empty filter sets most-recent-first, and an unbounded list of
//! named saved searches deletable by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use goshuin_core::error::CoreError;
use goshuin_core::search::{SavedSearch, SearchFilters, SearchHistoryEntry};
use goshuin_core::EntityId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// POST /api/search/history
///
/// Record a submitted filter set. Empty sets are skipped silently (204);
/// recorded entries come back with their id and timestamp (201).
pub async fn record_history(
    user: AuthUser,
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> AppResult<Response> {
    match state
        .search_store
        .record(user.user_id, filters, Utc::now())
        .await
    {
        Some(entry) => Ok((StatusCode::CREATED, Json(entry)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /api/search/history
pub async fn list_history(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SearchHistoryEntry>>> {
    Ok(Json(state.search_store.history(user.user_id).await))
}

/// DELETE /api/search/history
pub async fn clear_history(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    state.search_store.clear_history(user.user_id).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Saved searches
// ---------------------------------------------------------------------------

/// Request body for `POST /api/search/saved`.
#[derive(Debug, Deserialize)]
pub struct CreateSavedSearch {
    pub name: String,
    #[serde(default)]
    pub filters: SearchFilters,
}

/// POST /api/search/saved
pub async fn create_saved_search(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSavedSearch>,
) -> AppResult<(StatusCode, Json<SavedSearch>)> {
    let saved = state
        .search_store
        .save_search(user.user_id, &input.name, input.filters, Utc::now())
        .await?;

    tracing::info!(
        saved_search_id = %saved.id,
        user_id = %user.user_id,
        "Saved search created",
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/search/saved
pub async fn list_saved_searches(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SavedSearch>>> {
    Ok(Json(state.search_store.saved_searches(user.user_id).await))
}

/// DELETE /api/search/saved/{id}
pub async fn delete_saved_search(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = state.search_store.delete_saved(user.user_id, id).await;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SavedSearch",
            id,
        }));
    }

    tracing::info!(
        saved_search_id = %id,
        user_id = %user.user_id,
        "Saved search deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}
