//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the inference backend answered a model listing just now.
    pub inference_reachable: bool,
}

/// `GET /api/health` — liveness plus a best-effort inference probe.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let state = ctx.state.clone();
    let inference_reachable =
        tokio::task::spawn_blocking(move || state.inference.list_models().is_ok())
            .await
            .map_err(|e| ApiError::Internal(format!("probe task: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        inference_reachable,
    }))
}
