use std::sync::Arc;

use panel_backend::Backend;

use crate::cache::QueryCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Hosted backend (identity provider + profile queries).
    pub backend: Arc<dyn Backend>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cache of backend reads, invalidated by every successful write.
    pub cache: Arc<QueryCache>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, config: ServerConfig) -> Self {
        let cache = Arc::new(QueryCache::new(config.cache_ttl()));
        Self {
            backend,
            config: Arc::new(config),
            cache,
        }
    }
}
