//! Step help text endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Deserialize)]
pub struct HelpRequest {
    pub step_description: String,
}

#[derive(Serialize)]
pub struct HelpResponse {
    pub help_text: String,
}

/// `POST /api/help` — plain-language explanation for one UI step.
///
/// Advisory only: a failure is a 503 the client renders as "help
/// unavailable"; it never blocks the identification flow.
pub async fn generate(
    State(ctx): State<ApiContext>,
    Json(payload): Json<HelpRequest>,
) -> Result<Json<HelpResponse>, ApiError> {
    let description = payload.step_description.trim().to_string();
    if description.is_empty() {
        return Err(ApiError::BadRequest("Step description must not be empty".into()));
    }

    let state = ctx.state.clone();
    let help_text = tokio::task::spawn_blocking(move || state.help.help_for_step(&description))
        .await
        .map_err(|e| ApiError::Internal(format!("help task: {e}")))?
        .map_err(|e| ApiError::HelpUnavailable(e.to_string()))?;

    Ok(Json(HelpResponse { help_text }))
}
