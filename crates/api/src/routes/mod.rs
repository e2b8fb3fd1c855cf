pub mod auth;
pub mod health;
pub mod readings;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/google/login                 consent URL (public)
/// /auth/google/callback              code exchange, issues session (public)
/// /auth/logout                       logout (requires auth)
///
/// /me                                current user (requires auth)
///
/// /classify                          classify without recording (public)
///
/// /readings                          list, record, clear (requires auth)
/// /readings/summary                  headline statistics
/// /readings/trends                   chart series, target bands, per-context means
/// /readings/export                   CSV download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/me", get(handlers::auth::me))
        .route("/classify", post(handlers::classify::classify_reading))
        .nest("/readings", readings::router())
}
