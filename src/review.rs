//! Manual review queue — the fallback when resolution exhausts all steps.
//!
//! Records the serial number (plus an optional technician note) in memory
//! for human follow-up. Deliberately a stub: no persistence contract exists
//! yet, so tickets live for the process lifetime only.

use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

/// One recorded follow-up request.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewTicket {
    pub ticket_id: Uuid,
    pub serial_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// ISO 8601 submission time.
    pub recorded_at: String,
}

/// In-memory queue of review tickets, oldest first.
pub struct ReviewQueue {
    tickets: Mutex<Vec<ReviewTicket>>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
        }
    }

    /// Record a serial number for human review.
    pub fn submit(&self, serial_number: &str, note: Option<String>) -> ReviewTicket {
        let ticket = ReviewTicket {
            ticket_id: Uuid::new_v4(),
            serial_number: serial_number.to_string(),
            note,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        };

        tracing::info!(
            ticket_id = %ticket.ticket_id,
            serial = %ticket.serial_number,
            "Manual review ticket recorded"
        );

        if let Ok(mut tickets) = self.tickets.lock() {
            tickets.push(ticket.clone());
        }
        ticket
    }

    /// All pending tickets, in submission order.
    pub fn pending(&self) -> Vec<ReviewTicket> {
        self.tickets.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tickets.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReviewQueue {
    fn default() -> Self {
        Self::new()
    }
}
