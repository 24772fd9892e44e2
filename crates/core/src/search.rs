//! Search filters, bounded search history, and saved searches.
//!
//! Filters mirror the URL query parameters of the spot list views; a
//! submitted filter set drives a server-side refetch. The history keeps
//! the last ten non-empty filter sets, most recent first. Saved searches
//! are named, unlimited, and deletable by id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::spot::SpotType;
use crate::types::{EntityId, Timestamp};

/// Maximum number of history entries retained per user.
pub const MAX_HISTORY_ENTRIES: usize = 10;

// ---------------------------------------------------------------------------
// SearchFilters
// ---------------------------------------------------------------------------

/// One set of spot search filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefectures: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<SpotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl SearchFilters {
    /// True when no criterion is set. Empty filter sets are never recorded
    /// in the history.
    pub fn is_empty(&self) -> bool {
        self.keyword.as_deref().is_none_or(str::is_empty)
            && self.prefectures.is_empty()
            && self.categories.is_empty()
            && self.city.as_deref().is_none_or(str::is_empty)
    }

    /// Encode as URL query pairs. List values are comma-joined, matching
    /// the dashboard's query-string convention.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(keyword) = self.keyword.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("keyword", keyword.to_string()));
        }
        if !self.prefectures.is_empty() {
            pairs.push(("prefecture", self.prefectures.join(",")));
        }
        if !self.categories.is_empty() {
            let joined = self
                .categories
                .iter()
                .map(|category| category.as_str())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("category", joined));
        }
        if let Some(city) = self.city.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("city", city.to_string()));
        }
        pairs
    }

    /// Decode from URL query pairs. Unknown keys and unparseable category
    /// values are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = SearchFilters::default();
        for (key, value) in pairs {
            match key {
                "keyword" if !value.is_empty() => filters.keyword = Some(value.to_string()),
                "prefecture" => {
                    filters.prefectures = split_list(value);
                }
                "category" => {
                    filters.categories = value
                        .split(',')
                        .filter_map(|part| part.trim().parse().ok())
                        .collect();
                }
                "city" if !value.is_empty() => filters.city = Some(value.to_string()),
                _ => {}
            }
        }
        filters
    }

    /// Human-readable one-line summary for history and saved-search lists.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(keyword) = self.keyword.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("keyword: {keyword}"));
        }
        if !self.prefectures.is_empty() {
            parts.push(format!("prefecture: {}", self.prefectures.join(", ")));
        }
        if !self.categories.is_empty() {
            let joined = self
                .categories
                .iter()
                .map(|category| category.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("category: {joined}"));
        }
        if let Some(city) = self.city.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("city: {city}"));
        }
        if parts.is_empty() {
            "everything".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Search history
// ---------------------------------------------------------------------------

/// One recorded search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: EntityId,
    pub filters: SearchFilters,
    pub recorded_at: Timestamp,
}

/// Most-recent-first ring of the last [`MAX_HISTORY_ENTRIES`] searches.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a search at the front of the history, dropping the oldest
    /// entry past the cap. Empty filter sets are skipped and `None` is
    /// returned.
    pub fn record(
        &mut self,
        filters: SearchFilters,
        now: Timestamp,
    ) -> Option<SearchHistoryEntry> {
        if filters.is_empty() {
            return None;
        }

        let entry = SearchHistoryEntry {
            id: Uuid::new_v4(),
            filters,
            recorded_at: now,
        };
        self.entries.insert(0, entry.clone());
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Saved searches
// ---------------------------------------------------------------------------

/// A named, user-persisted filter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: EntityId,
    pub name: String,
    pub filters: SearchFilters,
    pub created_at: Timestamp,
}

impl SavedSearch {
    /// Create a saved search. The name is trimmed and must be non-empty.
    pub fn new(
        name: &str,
        filters: SearchFilters,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name must not be empty".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            filters,
            created_at: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn keyword_filters(keyword: &str) -> SearchFilters {
        SearchFilters {
            keyword: Some(keyword.to_string()),
            ..SearchFilters::default()
        }
    }

    // -- filters -------------------------------------------------------------

    #[test]
    fn default_filters_are_empty() {
        assert!(SearchFilters::default().is_empty());
    }

    #[test]
    fn blank_strings_count_as_empty() {
        let filters = SearchFilters {
            keyword: Some(String::new()),
            city: Some(String::new()),
            ..SearchFilters::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn query_pairs_round_trip() {
        let filters = SearchFilters {
            keyword: Some("inari".into()),
            prefectures: vec!["京都府".into(), "奈良県".into()],
            categories: vec![SpotType::Shrine, SpotType::Temple],
            city: Some("京都市".into()),
        };

        let pairs = filters.to_query_pairs();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        assert_eq!(SearchFilters::from_query_pairs(borrowed), filters);
    }

    #[test]
    fn from_query_pairs_ignores_unknown_keys_and_bad_categories() {
        let filters = SearchFilters::from_query_pairs([
            ("keyword", "fox"),
            ("category", "shrine,castle"),
            ("page", "3"),
        ]);
        assert_eq!(filters.keyword.as_deref(), Some("fox"));
        assert_eq!(filters.categories, vec![SpotType::Shrine]);
        assert!(filters.city.is_none());
    }

    #[test]
    fn summary_lists_set_criteria() {
        let filters = SearchFilters {
            keyword: Some("fox".into()),
            prefectures: vec!["京都府".into()],
            ..SearchFilters::default()
        };
        assert_eq!(filters.summary(), "keyword: fox | prefecture: 京都府");
        assert_eq!(SearchFilters::default().summary(), "everything");
    }

    // -- history -------------------------------------------------------------

    #[test]
    fn record_puts_most_recent_first() {
        let mut history = SearchHistory::new();
        history.record(keyword_filters("first"), Utc::now());
        history.record(keyword_filters("second"), Utc::now());

        assert_eq!(
            history.entries()[0].filters.keyword.as_deref(),
            Some("second")
        );
        assert_eq!(
            history.entries()[1].filters.keyword.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn empty_filter_sets_are_not_recorded() {
        let mut history = SearchHistory::new();
        assert!(history.record(SearchFilters::default(), Utc::now()).is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn history_is_capped_at_ten_entries() {
        let mut history = SearchHistory::new();
        for i in 0..15 {
            history.record(keyword_filters(&format!("query-{i}")), Utc::now());
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        // Newest survives at the front, the five oldest were dropped.
        assert_eq!(
            history.entries()[0].filters.keyword.as_deref(),
            Some("query-14")
        );
        assert_eq!(
            history.entries()[9].filters.keyword.as_deref(),
            Some("query-5")
        );
    }

    #[test]
    fn clear_empties_the_history() {
        let mut history = SearchHistory::new();
        history.record(keyword_filters("fox"), Utc::now());
        history.clear();
        assert!(history.is_empty());
    }

    // -- saved searches ------------------------------------------------------

    #[test]
    fn saved_search_trims_name() {
        let saved = SavedSearch::new("  Kyoto shrines ", keyword_filters("inari"), Utc::now())
            .unwrap();
        assert_eq!(saved.name, "Kyoto shrines");
    }

    #[test]
    fn saved_search_rejects_blank_name() {
        assert_matches!(
            SavedSearch::new("   ", SearchFilters::default(), Utc::now()),
            Err(CoreError::Validation(_))
        );
    }
}
