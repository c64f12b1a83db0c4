//! Handlers for the `/placeholders` utilities.

use axum::Json;
use serde::Deserialize;
use templar_core::extraction::extract_placeholders;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Request body for `POST /placeholders/extract`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub html: String,
}

/// POST /api/v1/placeholders/extract
///
/// Distinct placeholder names in order of first occurrence.
pub async fn extract(
    Json(body): Json<ExtractRequest>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    Ok(Json(DataResponse {
        data: extract_placeholders(&body.html),
    }))
}
