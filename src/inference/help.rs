//! Help Text Service — short step description in, plain-language help out.
//!
//! Purely advisory: failures degrade to a "help unavailable" state at the
//! surface and never block the main flow. Responses are cached in memory per
//! distinct step description for the lifetime of the process — help text for
//! a fixed set of UI steps does not need to be regenerated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use super::prompts::{build_help_prompt, HELP_SYSTEM_PROMPT};
use super::response::parse_json_object;
use super::types::{GenerateRequest, InferenceClient, InferenceError};

/// Generates and caches 1–2 sentence help texts for UI steps.
pub struct HelpTextService {
    client: Arc<dyn InferenceClient>,
    model: String,
    cache: Mutex<HashMap<String, String>>,
}

/// Expected model output: `{"help_text": "..."}`.
#[derive(Deserialize)]
struct HelpOutput {
    help_text: String,
}

impl HelpTextService {
    pub fn new(client: Arc<dyn InferenceClient>, model: String) -> Self {
        Self {
            client,
            model,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Help text for one step description, generated on first request and
    /// served from cache afterwards.
    pub fn help_for_step(&self, step_description: &str) -> Result<String, InferenceError> {
        if let Some(cached) = self.cached(step_description) {
            return Ok(cached);
        }

        let _span = tracing::info_span!("generate_help_text", model = %self.model).entered();

        let prompt = build_help_prompt(step_description);
        let request = GenerateRequest::text(&self.model, &prompt, Some(HELP_SYSTEM_PROMPT));
        let raw = self.client.generate(&request)?;

        let output: HelpOutput = parse_json_object(&raw)?;
        let help_text = output.help_text.trim().to_string();
        if help_text.is_empty() {
            return Err(InferenceError::MalformedOutput("empty help text".into()));
        }

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(step_description.to_string(), help_text.clone());
        }

        Ok(help_text)
    }

    /// Cached entry for a step description, if one exists.
    pub fn cached(&self, step_description: &str) -> Option<String> {
        self.cache.lock().ok()?.get(step_description).cloned()
    }
}
