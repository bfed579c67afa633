//! Serial Extraction Service — uploaded file in, candidate serials out.
//!
//! OCR ambiguity means the model may return several overlapping readings of
//! the same label; all of them are surfaced as equally plausible candidates
//! and disambiguation is deferred to the caller. No confidence score is
//! modeled. Exact duplicates are dropped as a quality measure, keeping
//! first-seen order.

use std::sync::Arc;

use serde::Deserialize;

use super::prompts::{EXTRACT_SYSTEM_PROMPT, EXTRACT_USER_PROMPT};
use super::response::parse_json_object;
use super::types::{GenerateRequest, InferenceClient, InferenceError};
use crate::data_uri::EncodedFile;

/// Extracts candidate serial numbers from an uploaded image or document.
pub struct SerialExtractionService {
    client: Arc<dyn InferenceClient>,
    model: String,
}

/// Expected model output: `{"serial_numbers": ["...", ...]}`.
#[derive(Deserialize)]
struct ExtractionOutput {
    #[serde(default)]
    serial_numbers: Vec<String>,
}

impl SerialExtractionService {
    pub fn new(client: Arc<dyn InferenceClient>, model: String) -> Self {
        Self { client, model }
    }

    /// Run extraction on one file. An empty list means "no detection", which
    /// is a normal outcome, not an error. Any inference failure propagates as
    /// a recoverable error — the caller prompts for manual entry.
    pub fn extract_serial_numbers(
        &self,
        file: &EncodedFile,
    ) -> Result<Vec<String>, InferenceError> {
        let _span = tracing::info_span!(
            "extract_serial_numbers",
            model = %self.model,
            media_type = %file.media_type(),
            file_size = file.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let request = GenerateRequest::text(
            &self.model,
            EXTRACT_USER_PROMPT,
            Some(EXTRACT_SYSTEM_PROMPT),
        )
        .with_image(file.base64_payload());

        let raw = self.client.generate(&request)?;
        let output: ExtractionOutput = parse_json_object(&raw)?;
        let candidates = sanitize_candidates(output.serial_numbers);

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            candidates = candidates.len(),
            "Serial extraction complete"
        );

        Ok(candidates)
    }
}

/// Trim whitespace, drop empties and exact duplicates; keep first-seen order.
fn sanitize_candidates(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
