//! Manual review endpoints — the terminal not-found fallback.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::review::ReviewTicket;

#[derive(Deserialize)]
pub struct SubmitReviewRequest {
    pub serial_number: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitReviewResponse {
    pub ticket_id: uuid::Uuid,
    pub recorded_at: String,
}

#[derive(Serialize)]
pub struct ListReviewResponse {
    pub tickets: Vec<ReviewTicket>,
}

/// `POST /api/review` — record a serial number for human follow-up.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ApiError> {
    let serial_number = payload.serial_number.trim().to_string();
    if serial_number.is_empty() {
        return Err(ApiError::BadRequest("Serial number must not be empty".into()));
    }

    let note = payload.note.filter(|n| !n.trim().is_empty());
    let ticket = ctx.state.review.submit(&serial_number, note);

    Ok(Json(SubmitReviewResponse {
        ticket_id: ticket.ticket_id,
        recorded_at: ticket.recorded_at,
    }))
}

/// `GET /api/review` — pending tickets in submission order.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ListReviewResponse>, ApiError> {
    Ok(Json(ListReviewResponse {
        tickets: ctx.state.review.pending(),
    }))
}
