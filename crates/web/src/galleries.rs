//! Shared registry of live gallery managers.
//!
//! Each parent record (spot or goshuin record) gets one
//! [`GalleryManager`] for the lifetime of the process, so the manager's
//! pending flag genuinely serializes mutations across concurrent requests
//! for the same gallery. Managers are created lazily from the backend's
//! canonical image list and re-synced whenever the gallery is listed.
//!
//! Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
//! shared across the application.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use goshuin_core::gallery::{GalleryImage, GalleryManager};
use goshuin_core::goshuin::GoshuinImage;
use goshuin_core::spot::SpotImage;
use goshuin_core::EntityId;

/// A registered gallery, locked per-operation by handlers.
pub type SharedGallery<T> = Arc<Mutex<GalleryManager<T>>>;

/// One registry map for a single image kind.
struct GalleryMap<T: GalleryImage> {
    galleries: RwLock<HashMap<EntityId, SharedGallery<T>>>,
}

impl<T: GalleryImage> GalleryMap<T> {
    fn new() -> Self {
        Self {
            galleries: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, parent_id: EntityId) -> Option<SharedGallery<T>> {
        self.galleries.read().await.get(&parent_id).cloned()
    }

    /// Replace (or create) a gallery from the backend's canonical image
    /// list. A pending manager is left untouched so an in-flight mutation
    /// cannot have its state swapped out from under it.
    async fn sync(&self, parent_id: EntityId, images: Vec<T>) -> SharedGallery<T> {
        let mut galleries = self.galleries.write().await;
        if let Some(existing) = galleries.get(&parent_id) {
            {
                let mut manager = existing.lock().await;
                if !manager.is_pending() {
                    *manager = GalleryManager::new(images);
                }
            }
            return Arc::clone(existing);
        }

        let gallery = Arc::new(Mutex::new(GalleryManager::new(images)));
        galleries.insert(parent_id, Arc::clone(&gallery));
        gallery
    }

    async fn evict(&self, parent_id: EntityId) {
        self.galleries.write().await.remove(&parent_id);
    }
}

/// Registry of all live gallery managers, one per parent record.
pub struct GalleryRegistry {
    spots: GalleryMap<SpotImage>,
    goshuin: GalleryMap<GoshuinImage>,
}

impl GalleryRegistry {
    pub fn new() -> Self {
        Self {
            spots: GalleryMap::new(),
            goshuin: GalleryMap::new(),
        }
    }

    // ---- spot image galleries ----

    pub async fn spot_gallery(&self, spot_id: EntityId) -> Option<SharedGallery<SpotImage>> {
        self.spots.get(spot_id).await
    }

    pub async fn sync_spot_gallery(
        &self,
        spot_id: EntityId,
        images: Vec<SpotImage>,
    ) -> SharedGallery<SpotImage> {
        self.spots.sync(spot_id, images).await
    }

    /// Drop a spot's gallery, e.g. after the spot itself is deleted or an
    /// upload changed the image set outside the manager's operations.
    pub async fn evict_spot_gallery(&self, spot_id: EntityId) {
        self.spots.evict(spot_id).await;
    }

    // ---- goshuin image galleries ----

    pub async fn goshuin_gallery(
        &self,
        record_id: EntityId,
    ) -> Option<SharedGallery<GoshuinImage>> {
        self.goshuin.get(record_id).await
    }

    pub async fn sync_goshuin_gallery(
        &self,
        record_id: EntityId,
        images: Vec<GoshuinImage>,
    ) -> SharedGallery<GoshuinImage> {
        self.goshuin.sync(record_id, images).await
    }

    pub async fn evict_goshuin_gallery(&self, record_id: EntityId) {
        self.goshuin.evict(record_id).await;
    }
}

impl Default for GalleryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
