//! Handlers for recording, listing, summarizing, exporting and clearing
//! the signed-in user's readings.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use glucolog_core::context::MeasurementContext;
use glucolog_core::export::{build_csv, export_file_name};
use glucolog_core::reading::{
    parse_time_of_day, validate_note, validate_reading_value, Reading,
};
use glucolog_core::reading_log::ReadingLog;
use glucolog_core::statistics::{
    recent_average, summarize, trend_report, ReadingSummary, TrendReport, RECENT_AVERAGE_WINDOW,
};
use glucolog_core::types::MgDl;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /readings`.
#[derive(Debug, Deserialize)]
pub struct CreateReadingRequest {
    /// Glucose value in mg/dL.
    pub value: MgDl,
    /// Unknown contexts resolve to `random`.
    pub context: MeasurementContext,
    /// Defaults to today (server local time).
    pub date: Option<NaiveDate>,
    /// `HH:MM`; defaults to now (server local time).
    pub time: Option<String>,
    pub note: Option<String>,
}

/// Response for `POST /readings`.
#[derive(Debug, Serialize)]
pub struct RecordedReading {
    pub reading: Reading,
    /// Mean of the last five readings, including this one.
    pub recent_average: Option<f64>,
}

/// Query parameters for `DELETE /readings`.
#[derive(Debug, Deserialize)]
pub struct ClearParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResult {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/readings
///
/// Validate, classify, and append a reading.
pub async fn create_reading(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReadingRequest>,
) -> AppResult<impl IntoResponse> {
    validate_reading_value(input.value)?;
    if let Some(ref note) = input.note {
        validate_note(note)?;
    }

    let now = Local::now().naive_local();
    let date = input.date.unwrap_or(now.date());
    let time = match input.time.as_deref() {
        Some(raw) => parse_time_of_day(raw)?,
        None => now.time(),
    };

    let reading = Reading::record(input.value, input.context, date.and_time(time), input.note);
    let reading = state.store.append(&auth.email, reading).await?;

    // Already stored: a failed re-read drops the quick stat, not the request.
    let recent_average = match load_log(&state, &auth.email).await {
        Ok(log) => recent_average(&log, RECENT_AVERAGE_WINDOW),
        Err(e) => {
            tracing::warn!(email = %auth.email, error = %e, "Recent average unavailable after save");
            None
        }
    };

    tracing::info!(
        email = %auth.email,
        value = reading.value(),
        context = reading.context().as_str(),
        tone = reading.tone().as_str(),
        "Reading recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecordedReading {
                reading,
                recent_average,
            },
        }),
    ))
}

/// GET /api/v1/readings
///
/// History, newest first.
pub async fn list_readings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Reading>>>> {
    let log = load_log(&state, &auth.email).await?;
    Ok(Json(DataResponse {
        data: log.newest_first().cloned().collect(),
    }))
}

/// GET /api/v1/readings/summary
///
/// `data` is `null` when the user has no readings.
pub async fn get_summary(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<ReadingSummary>>>> {
    let log = load_log(&state, &auth.email).await?;
    Ok(Json(DataResponse {
        data: summarize(log.as_slice()),
    }))
}

/// GET /api/v1/readings/trends
pub async fn get_trends(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<TrendReport>>> {
    let log = load_log(&state, &auth.email).await?;
    Ok(Json(DataResponse {
        data: trend_report(log.as_slice()),
    }))
}

/// GET /api/v1/readings/export
///
/// The full log as a CSV attachment, oldest first.
pub async fn export_readings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let log = load_log(&state, &auth.email).await?;
    let csv = build_csv(log.as_slice());
    let file_name = export_file_name(Local::now().date_naive());

    tracing::info!(email = %auth.email, rows = log.len(), "Readings exported");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    ))
}

/// DELETE /api/v1/readings?confirm=true
///
/// Permanently delete every reading the user has.
pub async fn clear_readings(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> AppResult<Json<DataResponse<ClearResult>>> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deleting all readings is permanent; repeat with confirm=true".into(),
        ));
    }

    let deleted = state.store.clear(&auth.email).await?;
    tracing::warn!(email = %auth.email, deleted, "All readings cleared");

    Ok(Json(DataResponse {
        data: ClearResult { deleted },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_log(state: &AppState, owner: &str) -> AppResult<ReadingLog> {
    Ok(state.store.list_all(owner).await?.into_iter().collect())
}
