//! Stateless classification endpoint.

use axum::Json;
use glucolog_core::classification::{classify_label, Classification};
use glucolog_core::types::MgDl;
use serde::Deserialize;

use crate::response::DataResponse;

/// Request body for `POST /classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub value: MgDl,
    /// Context identifier or label; anything unrecognized uses the random rule.
    pub context: String,
}

/// POST /api/v1/classify
///
/// Classify a value without recording it. Accepts any integer.
pub async fn classify_reading(
    Json(input): Json<ClassifyRequest>,
) -> Json<DataResponse<Classification>> {
    Json(DataResponse {
        data: classify_label(input.value, &input.context),
    })
}
