use std::sync::Arc;

use landing_store::RowStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The landing rows store. One per process, owning both data files.
    pub store: Arc<RowStore>,
    /// Server configuration (JWT secret, card bound, ...).
    pub config: Arc<ServerConfig>,
}
