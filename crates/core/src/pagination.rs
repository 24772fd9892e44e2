//! Pagination envelope and the infinite list controller.
//!
//! The backend serves collections as `{items, total, page, size}` pages.
//! [`InfiniteList`] accumulates those pages the way the dashboard's
//! endless-scroll views do: a sentinel trigger asks for the next page only
//! while one is not already in flight and more items remain, a successful
//! page is appended and advances the cursor, and a failure is surfaced
//! without advancing so the next trigger retries the same page.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Page envelope and parameter clamping
// ---------------------------------------------------------------------------

/// Default number of items per page, matching the dashboard's list views.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum number of items per page accepted from a client.
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of a collection, in the backend's envelope shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

/// Clamp a user-provided 1-based page number. Defaults to the first page.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).max(1).min(MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Infinite list controller
// ---------------------------------------------------------------------------

/// Loading state of an [`InfiniteList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Ready for the next trigger.
    Idle,
    /// A page request is in flight; further triggers are ignored.
    Loading,
    /// The last request failed; the message is surfaced and the next
    /// trigger retries the same page.
    Error(String),
    /// Every item is loaded (`items.len() == total`).
    Exhausted,
}

/// A page the controller wants fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

/// Accumulates pages of a collection under the no-overlap rule.
#[derive(Debug, Clone)]
pub struct InfiniteList<T> {
    items: Vec<T>,
    page: i64,
    size: i64,
    total: Option<i64>,
    state: LoadState,
}

impl<T> InfiniteList<T> {
    /// An empty controller that has not fetched anything yet. The total is
    /// unknown until the first page completes.
    pub fn empty(size: i64) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            size,
            total: None,
            state: LoadState::Idle,
        }
    }

    /// Seed the controller from an already-fetched first page.
    pub fn start(first: Paginated<T>) -> Self {
        let mut list = Self::empty(first.size);
        list.state = LoadState::Loading;
        list.complete(first);
        list
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Total reported by the backend, once the first page has arrived.
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    /// Whether more items remain to be fetched. Unknown totals count as
    /// "more", so the first trigger always fires.
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => (self.items.len() as i64) < total,
            None => true,
        }
    }

    /// The sentinel trigger. Yields the next page request from idle or
    /// error while more items remain; never while a request is in flight
    /// and never once exhausted.
    pub fn next_request(&mut self) -> Option<PageRequest> {
        match self.state {
            LoadState::Loading | LoadState::Exhausted => None,
            LoadState::Idle | LoadState::Error(_) => {
                if !self.has_more() {
                    self.state = LoadState::Exhausted;
                    return None;
                }
                self.state = LoadState::Loading;
                Some(PageRequest {
                    page: self.page + 1,
                    size: self.size,
                })
            }
        }
    }

    /// Apply a successfully fetched page: append its items, advance the
    /// cursor, and return to idle (or exhausted when everything is
    /// loaded). An empty page also exhausts the list, so an inconsistent
    /// total can never cause an endless walk.
    pub fn complete(&mut self, page: Paginated<T>) {
        let fetched = page.items.len();
        self.items.extend(page.items);
        self.page = page.page;
        self.total = Some(page.total);

        self.state = if fetched == 0 || !self.has_more() {
            LoadState::Exhausted
        } else {
            LoadState::Idle
        };
    }

    /// Record a failed fetch. The cursor does not advance; the next
    /// trigger retries.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Error(message.into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn page(items: std::ops::Range<i64>, total: i64, page_no: i64) -> Paginated<i64> {
        Paginated {
            items: items.collect(),
            total,
            page: page_no,
            size: 3,
        }
    }

    // -- clamping ------------------------------------------------------------

    #[test]
    fn clamp_page_defaults_and_floors() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn clamp_size_defaults_and_caps() {
        assert_eq!(clamp_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_size(Some(0)), 1);
        assert_eq!(clamp_size(Some(500)), MAX_PAGE_SIZE);
        assert_eq!(clamp_size(Some(30)), 30);
    }

    // -- controller ----------------------------------------------------------

    #[test]
    fn first_trigger_requests_page_one() {
        let mut list = InfiniteList::<i64>::empty(3);
        let request = list.next_request().unwrap();
        assert_eq!(request, PageRequest { page: 1, size: 3 });
        assert_eq!(*list.state(), LoadState::Loading);
    }

    #[test]
    fn no_trigger_while_loading() {
        let mut list = InfiniteList::<i64>::empty(3);
        assert!(list.next_request().is_some());
        assert!(list.next_request().is_none());
        assert!(list.next_request().is_none());
    }

    #[test]
    fn complete_appends_and_advances() {
        let mut list = InfiniteList::empty(3);
        list.next_request().unwrap();
        list.complete(page(0..3, 7, 1));

        assert_eq!(list.items(), &[0, 1, 2]);
        assert_eq!(list.total(), Some(7));
        assert_eq!(*list.state(), LoadState::Idle);

        let request = list.next_request().unwrap();
        assert_eq!(request.page, 2);
    }

    #[test]
    fn exhausts_when_all_items_loaded() {
        let mut list = InfiniteList::empty(3);
        list.next_request().unwrap();
        list.complete(page(0..3, 5, 1));
        list.next_request().unwrap();
        list.complete(page(3..5, 5, 2));

        assert_eq!(*list.state(), LoadState::Exhausted);
        assert!(!list.has_more());
        assert!(list.next_request().is_none());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn empty_collection_exhausts_immediately() {
        let mut list = InfiniteList::<i64>::empty(3);
        list.next_request().unwrap();
        list.complete(page(0..0, 0, 1));
        assert_eq!(*list.state(), LoadState::Exhausted);
        assert!(list.next_request().is_none());
    }

    #[test]
    fn empty_page_with_inconsistent_total_still_exhausts() {
        let mut list = InfiniteList::empty(3);
        list.next_request().unwrap();
        list.complete(page(0..3, 100, 1));
        list.next_request().unwrap();
        // Backend claims 100 items but returns nothing more.
        list.complete(page(0..0, 100, 2));
        assert_eq!(*list.state(), LoadState::Exhausted);
    }

    #[test]
    fn failure_surfaces_error_and_allows_retry() {
        let mut list = InfiniteList::empty(3);
        list.next_request().unwrap();
        list.complete(page(0..3, 7, 1));

        let request = list.next_request().unwrap();
        list.fail("upstream timed out");
        assert_matches!(list.state(), LoadState::Error(message) if message == "upstream timed out");

        // Cursor did not advance; the retry asks for the same page.
        let retry = list.next_request().unwrap();
        assert_eq!(retry, request);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn start_seeds_from_first_page() {
        let list = InfiniteList::start(page(0..3, 3, 1));
        assert_eq!(list.len(), 3);
        assert_eq!(*list.state(), LoadState::Exhausted);

        let mut open = InfiniteList::start(page(0..3, 9, 1));
        assert_eq!(*open.state(), LoadState::Idle);
        assert_eq!(open.next_request().unwrap().page, 2);
    }
}
