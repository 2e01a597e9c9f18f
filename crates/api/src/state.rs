use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: placemap_db::DbPool,
    /// Server configuration (URL building, upload limits).
    pub config: Arc<ServerConfig>,
    /// Image blob store.
    pub media: Arc<MediaStorage>,
}
