//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
///
/// The two `Unavailable` variants are the "degrade, don't crash" paths:
/// clients offer manual serial entry or hide the help affordance.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Serial extraction unavailable: {0}")]
    ExtractionUnavailable(String),
    #[error("Help text unavailable: {0}")]
    HelpUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::ExtractionUnavailable(detail) => {
                tracing::warn!(%detail, "Extraction unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EXTRACTION_UNAVAILABLE",
                    "Serial number could not be read automatically. Enter it manually."
                        .to_string(),
                )
            }
            ApiError::HelpUnavailable(detail) => {
                tracing::warn!(%detail, "Help text unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "HELP_UNAVAILABLE",
                    "Help is unavailable right now.".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
