//! Route definitions for the `/readings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Routes mounted at `/readings`. All require auth.
///
/// ```text
/// GET    /          -> list_readings
/// POST   /          -> create_reading
/// DELETE /          -> clear_readings (?confirm=true)
/// GET    /summary   -> get_summary
/// GET    /trends    -> get_trends
/// GET    /export    -> export_readings (text/csv)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(readings::list_readings)
                .post(readings::create_reading)
                .delete(readings::clear_readings),
        )
        .route("/summary", get(readings::get_summary))
        .route("/trends", get(readings::get_trends))
        .route("/export", get(readings::export_readings))
}
