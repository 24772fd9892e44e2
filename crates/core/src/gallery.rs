//! Gallery state machine shared by spot and goshuin image managers.
//!
//! A [`GalleryManager`] holds the ordered image list for one parent record
//! and mediates the three mutating operations (reorder, metadata edit,
//! delete). Mutations follow a commit-or-abort protocol: the caller marks
//! the manager pending with [`begin`](GalleryManager::begin), performs the
//! server round-trip, then either commits the server's canonical result or
//! aborts, leaving the local list exactly as it was. A single pending flag
//! serializes mutations; a second [`begin`](GalleryManager::begin) while
//! one is outstanding fails with [`GalleryError::Busy`].

use crate::types::EntityId;

// ---------------------------------------------------------------------------
// GalleryImage
// ---------------------------------------------------------------------------

/// An image record that can live in a gallery.
///
/// The primary-flag accessors default to "no such flag" so image kinds
/// without one (goshuin images) only implement `id` and `display_order`.
pub trait GalleryImage {
    fn id(&self) -> EntityId;

    fn display_order(&self) -> i32;

    fn is_primary(&self) -> bool {
        false
    }

    fn clear_primary(&mut self) {}
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// Another mutation is still outstanding for this gallery.
    #[error("another gallery operation is already in progress")]
    Busy,

    /// A commit or abort arrived without a preceding `begin`.
    #[error("no gallery operation is in progress")]
    NotPending,

    /// An id was referenced that is not part of this gallery.
    #[error("unknown image id {0}")]
    UnknownImage(EntityId),

    /// A reorder draft mentioned the same id twice.
    #[error("duplicate image id {0} in reorder request")]
    DuplicateImage(EntityId),

    /// A reorder draft or canonical response did not cover exactly the
    /// gallery's current id set.
    #[error("image ids do not match the current gallery")]
    IdSetMismatch,

    /// A canonical response carried display orders that are not `0..N-1`
    /// in list position.
    #[error("display order in response is not contiguous")]
    OrderNotDense,
}

// ---------------------------------------------------------------------------
// ReorderDraft
// ---------------------------------------------------------------------------

/// A working copy of a gallery's id order, edited one step at a time
/// before being submitted as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderDraft {
    ids: Vec<EntityId>,
}

impl ReorderDraft {
    pub fn new(ids: Vec<EntityId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<EntityId> {
        self.ids
    }

    /// Move `id` one position toward the front. Returns `false` when the id
    /// is unknown or already first.
    pub fn move_up(&mut self, id: EntityId) -> bool {
        match self.ids.iter().position(|&candidate| candidate == id) {
            Some(index) if index > 0 => {
                self.ids.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Move `id` one position toward the back. Returns `false` when the id
    /// is unknown or already last.
    pub fn move_down(&mut self, id: EntityId) -> bool {
        match self.ids.iter().position(|&candidate| candidate == id) {
            Some(index) if index + 1 < self.ids.len() => {
                self.ids.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// GalleryManager
// ---------------------------------------------------------------------------

/// Ordered image list for one parent record, with serialized mutations.
#[derive(Debug, Clone)]
pub struct GalleryManager<T: GalleryImage> {
    images: Vec<T>,
    pending: bool,
}

impl<T: GalleryImage> GalleryManager<T> {
    /// Build a manager from a server-provided image list. The list is
    /// sorted by display order so local state always reflects the
    /// canonical ordering.
    pub fn new(mut images: Vec<T>) -> Self {
        images.sort_by_key(GalleryImage::display_order);
        Self {
            images,
            pending: false,
        }
    }

    pub fn images(&self) -> &[T] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Ids in current display order.
    pub fn image_ids(&self) -> Vec<EntityId> {
        self.images.iter().map(GalleryImage::id).collect()
    }

    /// Start a reorder draft from the current order.
    pub fn reorder_draft(&self) -> ReorderDraft {
        ReorderDraft::new(self.image_ids())
    }

    /// Number of images flagged primary. At most one after a successful
    /// primary-selection commit.
    pub fn primary_count(&self) -> usize {
        self.images.iter().filter(|image| image.is_primary()).count()
    }

    /// Whether display orders are exactly `0..N-1` in list position.
    pub fn is_dense(&self) -> bool {
        self.images
            .iter()
            .enumerate()
            .all(|(index, image)| image.display_order() == index as i32)
    }

    // -- mutation protocol --------------------------------------------------

    /// Mark a mutation as outstanding. Fails with [`GalleryError::Busy`]
    /// while a previous mutation has not been committed or aborted.
    pub fn begin(&mut self) -> Result<(), GalleryError> {
        if self.pending {
            return Err(GalleryError::Busy);
        }
        self.pending = true;
        Ok(())
    }

    /// Drop the pending flag without touching the image list. Called when
    /// the server round-trip failed; the error message is surfaced to the
    /// user and local state stays as it was.
    pub fn abort(&mut self) {
        self.pending = false;
    }

    /// Check a reorder draft against the current gallery: every current id
    /// exactly once, nothing else.
    pub fn validate_draft(&self, draft: &[EntityId]) -> Result<(), GalleryError> {
        let mut seen = Vec::with_capacity(draft.len());
        for &id in draft {
            if seen.contains(&id) {
                return Err(GalleryError::DuplicateImage(id));
            }
            seen.push(id);
        }

        if draft.len() != self.images.len() {
            return Err(GalleryError::IdSetMismatch);
        }
        for image in &self.images {
            if !seen.contains(&image.id()) {
                return Err(GalleryError::IdSetMismatch);
            }
        }
        Ok(())
    }

    /// Replace the image list with the server's canonical reorder
    /// response. The response must cover the same id set and carry dense
    /// display orders. The pending flag is cleared whether or not the
    /// response is acceptable; on error the local list is left unchanged.
    pub fn commit_reorder(&mut self, canonical: Vec<T>) -> Result<(), GalleryError> {
        if !self.pending {
            return Err(GalleryError::NotPending);
        }
        self.pending = false;

        self.validate_canonical(&canonical)?;
        self.images = canonical;
        Ok(())
    }

    /// Replace the single edited record and re-sort by display order. When
    /// the updated record is flagged primary, every sibling's primary flag
    /// is cleared locally, mirroring the server's single-primary rule.
    pub fn commit_metadata(&mut self, updated: T) -> Result<(), GalleryError> {
        if !self.pending {
            return Err(GalleryError::NotPending);
        }
        self.pending = false;

        let Some(index) = self
            .images
            .iter()
            .position(|image| image.id() == updated.id())
        else {
            return Err(GalleryError::UnknownImage(updated.id()));
        };

        if updated.is_primary() {
            for image in &mut self.images {
                image.clear_primary();
            }
        }
        self.images[index] = updated;
        self.images.sort_by_key(GalleryImage::display_order);
        Ok(())
    }

    /// Remove exactly the one deleted image from the local list.
    pub fn commit_delete(&mut self, id: EntityId) -> Result<T, GalleryError> {
        if !self.pending {
            return Err(GalleryError::NotPending);
        }
        self.pending = false;

        let Some(index) = self.images.iter().position(|image| image.id() == id) else {
            return Err(GalleryError::UnknownImage(id));
        };
        Ok(self.images.remove(index))
    }

    fn validate_canonical(&self, canonical: &[T]) -> Result<(), GalleryError> {
        if canonical.len() != self.images.len() {
            return Err(GalleryError::IdSetMismatch);
        }

        let mut seen = Vec::with_capacity(canonical.len());
        for image in canonical {
            if seen.contains(&image.id()) {
                return Err(GalleryError::DuplicateImage(image.id()));
            }
            seen.push(image.id());
        }
        for image in &self.images {
            if !seen.contains(&image.id()) {
                return Err(GalleryError::IdSetMismatch);
            }
        }

        let dense = canonical
            .iter()
            .enumerate()
            .all(|(index, image)| image.display_order() == index as i32);
        if !dense {
            return Err(GalleryError::OrderNotDense);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
