//! Serial extraction endpoint — upload in, candidate serials out.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config::MAX_UPLOAD_BYTES;
use crate::data_uri::EncodedFile;

#[derive(Deserialize)]
pub struct ExtractRequest {
    /// The uploaded file as a `data:<mimetype>;base64,<payload>` string.
    pub file: String,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub serial_numbers: Vec<String>,
}

/// `POST /api/extract` — run serial extraction on one uploaded file.
///
/// A malformed or oversized upload is a 400 (file I/O failure class, no
/// retry); an inference failure is a 503 so the client falls back to manual
/// entry. An empty candidate list is a successful response — the client
/// handles "no detection" the same way.
pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let file = decode_upload(&payload.file)?;

    let state = ctx.state.clone();
    let serial_numbers =
        tokio::task::spawn_blocking(move || state.extraction.extract_serial_numbers(&file))
            .await
            .map_err(|e| ApiError::Internal(format!("extraction task: {e}")))?
            .map_err(|e| ApiError::ExtractionUnavailable(e.to_string()))?;

    Ok(Json(ExtractResponse { serial_numbers }))
}

/// Validate and decode an uploaded data URI, enforcing the size cap.
pub(crate) fn decode_upload(data_uri: &str) -> Result<EncodedFile, ApiError> {
    let file = EncodedFile::from_data_uri(data_uri)
        .map_err(|e| ApiError::BadRequest(format!("Invalid file data: {e}")))?;
    if file.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(format!(
            "File exceeds {} MB size limit ({} bytes)",
            MAX_UPLOAD_BYTES / (1024 * 1024),
            file.len()
        )));
    }
    Ok(file)
}
