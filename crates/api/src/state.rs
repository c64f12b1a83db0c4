use std::sync::Arc;

use templar_core::catalog::Catalog;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the catalog sits behind a single lock so every write
/// runs to completion before the next request observes it.
#[derive(Clone)]
pub struct AppState {
    /// The contract type and template catalog.
    pub catalog: Arc<RwLock<Catalog>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            config: Arc::new(config),
        }
    }
}
