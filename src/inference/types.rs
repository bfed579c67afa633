//! Inference layer types — error taxonomy and the client trait all
//! AI-backed services are written against.

/// Errors from the inference layer.
///
/// Transport and backend failures are recoverable by design: every caller
/// either degrades to a manual path (extraction, help) or treats the failure
/// as a negative verdict at its pipeline step (search).
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    #[error("Cannot reach inference backend at {0}")]
    Connection(String),

    #[error("Inference HTTP error: {0}")]
    HttpClient(String),

    #[error("Inference backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Failed to parse inference response: {0}")]
    ResponseParsing(String),

    #[error("Model output malformed: {0}")]
    MalformedOutput(String),
}

/// A structured generation request handed to the inference backend.
///
/// `images` carries bare base64 payloads (no data-URI prefix) as the
/// Ollama-style API expects them.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: Option<&'a str>,
    pub images: Vec<String>,
}

impl<'a> GenerateRequest<'a> {
    pub fn text(model: &'a str, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model,
            prompt,
            system,
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, base64_payload: String) -> Self {
        self.images.push(base64_payload);
        self
    }
}

/// Client seam for the generative backend.
///
/// Production uses `OllamaClient`; tests use `MockInferenceClient`. The
/// contract is deliberately narrow: a request in, a raw response string out.
/// Output-schema enforcement happens in the services via lenient JSON
/// extraction, never in the transport.
pub trait InferenceClient: Send + Sync {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, InferenceError>;

    fn list_models(&self) -> Result<Vec<String>, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_has_no_images() {
        let req = GenerateRequest::text("m", "p", None);
        assert!(req.images.is_empty());
        assert!(req.system.is_none());
    }

    #[test]
    fn with_image_appends_payload() {
        let req = GenerateRequest::text("m", "p", Some("s")).with_image("QUJD".into());
        assert_eq!(req.images.len(), 1);
        assert_eq!(req.images[0], "QUJD");
    }

    #[test]
    fn errors_render_useful_messages() {
        let err = InferenceError::Backend {
            status: 500,
            body: "model not loaded".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model not loaded"));
    }
}
