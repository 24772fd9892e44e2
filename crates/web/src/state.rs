use std::sync::Arc;

use goshuin_upstream::BackendClient;

use crate::config::ServerConfig;
use crate::galleries::GalleryRegistry;
use crate::search_store::SearchStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Typed client for the backend REST API.
    pub backend: Arc<BackendClient>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-record gallery managers (spot and goshuin image galleries).
    pub galleries: Arc<GalleryRegistry>,
    /// Per-user search history and saved searches.
    pub search_store: Arc<SearchStore>,
}

impl AppState {
    pub fn new(backend: BackendClient, config: ServerConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
            galleries: Arc::new(GalleryRegistry::new()),
            search_store: Arc::new(SearchStore::new()),
        }
    }
}
