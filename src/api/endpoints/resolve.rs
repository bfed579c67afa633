//! Product resolution endpoint — drives the fallback pipeline.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::extract::decode_upload;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::registry::ProductRecord;
use crate::resolve::{NotFoundReason, ResolutionOutcome, ResolutionSource};

#[derive(Deserialize)]
pub struct ResolveRequest {
    pub serial_number: String,
    /// Optional uploaded file (data URI) for image-grounded search and the
    /// result card preview.
    #[serde(default)]
    pub file: Option<String>,
}

/// Tagged resolution result for the client.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolveResponse {
    Found {
        product: ProductRecord,
        source: ResolutionSource,
    },
    NotFound {
        reason: NotFoundReason,
    },
}

/// `POST /api/resolve` — resolve a confirmed serial number.
///
/// The serial is never pattern-validated; only emptiness is rejected. All
/// pipeline-internal failures are already recovered inside the pipeline, so
/// this handler only translates the terminal outcome.
pub async fn resolve(
    State(ctx): State<ApiContext>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let serial_number = payload.serial_number.trim().to_string();
    if serial_number.is_empty() {
        return Err(ApiError::BadRequest("Serial number must not be empty".into()));
    }

    let file = payload
        .file
        .as_deref()
        .map(decode_upload)
        .transpose()?;

    let state = ctx.state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        state.pipeline.resolve(&serial_number, file.as_ref())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("resolution task: {e}")))?;

    let response = match outcome {
        ResolutionOutcome::Found { record, source } => ResolveResponse::Found {
            product: record,
            source,
        },
        ResolutionOutcome::NotFound { reason } => ResolveResponse::NotFound { reason },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_response_serializes_with_status_tag() {
        let response = ResolveResponse::Found {
            product: ProductRecord {
                identifier: "SN12345XYZ".into(),
                name: "QuantumCore X1 Motherboard".into(),
                kind: "ATX Motherboard".into(),
                manufacturer: "Innovatech Inc.".into(),
                description: "A board.".into(),
                image_url: "about:blank".into(),
            },
            source: ResolutionSource::Registry,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"found\""));
        assert!(json.contains("\"source\":\"registry\""));
    }

    #[test]
    fn not_found_response_carries_reason() {
        let response = ResolveResponse::NotFound {
            reason: NotFoundReason::SearchError,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"not_found\""));
        assert!(json.contains("\"reason\":\"search_error\""));
    }
}
