use std::sync::Arc;

use glucolog_core::store::ReadingStore;

use crate::auth::google::GoogleClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Per-user reading logs.
    pub store: Arc<dyn ReadingStore>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Google OAuth client; `None` when sign-in is not configured.
    pub google: Option<Arc<GoogleClient>>,
}
