//! Product Web-Search Service — serial number (plus optional image) in,
//! found/not-found verdict out.
//!
//! The one correctness property here: the model is instructed to never
//! fabricate a product when it lacks credible information. Absence of
//! evidence must come back as `found: false` with a reasoning string, and
//! this service enforces the shape of that contract (a `found` verdict
//! without a product payload is treated as not found).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::prompts::{build_search_prompt, SEARCH_SYSTEM_PROMPT};
use super::response::parse_json_object;
use super::types::{GenerateRequest, InferenceClient, InferenceError};
use crate::data_uri::EncodedFile;

/// Product fields returned by a successful search.
///
/// `kind` is the product category ("ATX Motherboard", "Printed Circuit
/// Assembly"). Accepts `type` as an alias since models echo the older field
/// name from the prompt examples they were trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    #[serde(alias = "type")]
    pub kind: String,
    pub manufacturer: String,
    pub description: String,
}

/// Tagged search result: a verdict plus a mandatory explanation.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchVerdict {
    pub found: bool,
    #[serde(default)]
    pub product: Option<ProductInfo>,
    #[serde(default)]
    pub reasoning: String,
}

impl SearchVerdict {
    /// A usable hit: the verdict is positive and the payload is present.
    pub fn hit(&self) -> Option<&ProductInfo> {
        if self.found {
            self.product.as_ref()
        } else {
            None
        }
    }
}

/// Search seam the resolution pipeline is written against.
///
/// Production is `AiProductSearch`; tests substitute counting mocks to
/// assert step ordering.
pub trait ProductSearch: Send + Sync {
    fn search(
        &self,
        serial_number: &str,
        file: Option<&EncodedFile>,
    ) -> Result<SearchVerdict, InferenceError>;
}

/// AI-backed product search.
///
/// Model selection follows the payload: text model for serial-only queries,
/// vision model when an image travels along.
pub struct AiProductSearch {
    client: Arc<dyn InferenceClient>,
    text_model: String,
    vision_model: String,
}

impl AiProductSearch {
    pub fn new(client: Arc<dyn InferenceClient>, text_model: String, vision_model: String) -> Self {
        Self {
            client,
            text_model,
            vision_model,
        }
    }
}

impl ProductSearch for AiProductSearch {
    fn search(
        &self,
        serial_number: &str,
        file: Option<&EncodedFile>,
    ) -> Result<SearchVerdict, InferenceError> {
        let model = if file.is_some() {
            &self.vision_model
        } else {
            &self.text_model
        };

        let _span = tracing::info_span!(
            "product_search",
            model = %model,
            serial = %serial_number,
            with_image = file.is_some(),
        )
        .entered();
        let start = std::time::Instant::now();

        let prompt = build_search_prompt(serial_number, file.is_some());
        let mut request = GenerateRequest::text(model, &prompt, Some(SEARCH_SYSTEM_PROMPT));
        if let Some(file) = file {
            request = request.with_image(file.base64_payload());
        }

        let raw = self.client.generate(&request)?;
        let mut verdict: SearchVerdict = parse_json_object(&raw)?;

        // found=true with no payload violates the output contract; downgrade
        // rather than surface a speculative record.
        if verdict.found && verdict.product.is_none() {
            tracing::warn!(serial = %serial_number, "Search verdict positive but payload missing");
            verdict.found = false;
        }

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            found = verdict.found,
            "Product search complete"
        );

        Ok(verdict)
    }
}
