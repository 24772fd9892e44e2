//! Per-user search history and saved searches.
//!
//! The browser tier used to keep these in local storage; here they live
//! server-side, keyed by the authenticated user's id. The store is
//! in-memory and process-local, matching local storage's best-effort
//! durability.
//!
//! Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
//! shared across the application.

use std::collections::HashMap;

use tokio::sync::RwLock;

use goshuin_core::error::CoreError;
use goshuin_core::search::{
    SavedSearch, SearchFilters, SearchHistory, SearchHistoryEntry,
};
use goshuin_core::{EntityId, Timestamp};

/// In-memory store of search history and saved searches, per user.
pub struct SearchStore {
    histories: RwLock<HashMap<EntityId, SearchHistory>>,
    saved: RwLock<HashMap<EntityId, Vec<SavedSearch>>>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self {
            histories: RwLock::new(HashMap::new()),
            saved: RwLock::new(HashMap::new()),
        }
    }

    // ---- history ----

    /// Record a search for `user_id`. Returns the new entry, or `None`
    /// when the filter set was empty and skipped.
    pub async fn record(
        &self,
        user_id: EntityId,
        filters: SearchFilters,
        now: Timestamp,
    ) -> Option<SearchHistoryEntry> {
        let mut histories = self.histories.write().await;
        histories.entry(user_id).or_default().record(filters, now)
    }

    /// The user's history, most recent first.
    pub async fn history(&self, user_id: EntityId) -> Vec<SearchHistoryEntry> {
        self.histories
            .read()
            .await
            .get(&user_id)
            .map(|history| history.entries().to_vec())
            .unwrap_or_default()
    }

    pub async fn clear_history(&self, user_id: EntityId) {
        if let Some(history) = self.histories.write().await.get_mut(&user_id) {
            history.clear();
        }
    }

    // ---- saved searches ----

    /// Save a named search for `user_id`. The name must be non-blank.
    pub async fn save_search(
        &self,
        user_id: EntityId,
        name: &str,
        filters: SearchFilters,
        now: Timestamp,
    ) -> Result<SavedSearch, CoreError> {
        let saved = SavedSearch::new(name, filters, now)?;
        self.saved
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(saved.clone());
        Ok(saved)
    }

    pub async fn saved_searches(&self, user_id: EntityId) -> Vec<SavedSearch> {
        self.saved
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Delete one of the user's saved searches. Returns `false` when no
    /// search with that id exists.
    pub async fn delete_saved(&self, user_id: EntityId, id: EntityId) -> bool {
        let mut saved = self.saved.write().await;
        let Some(searches) = saved.get_mut(&user_id) else {
            return false;
        };
        let before = searches.len();
        searches.retain(|search| search.id != id);
        searches.len() != before
    }
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}
