//! Ollama HTTP client — the production `InferenceClient`.
//!
//! Speaks the Ollama-compatible API: `/api/generate` for (optionally
//! vision-grounded) completion, `/api/tags` for model discovery. Requests
//! ask for `format: "json"` so responses match the structured output
//! schemas the services parse.

use serde::{Deserialize, Serialize};

use super::types::{GenerateRequest, InferenceClient, InferenceError};
use crate::config;

/// Blocking HTTP client for a local Ollama-compatible backend.
///
/// Blocking on purpose: every AI call in the system is a single
/// suspend-point in a sequential user-driven flow. Async callers bridge
/// with `tokio::task::spawn_blocking`.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from `PARTLENS_OLLAMA_URL` / timeout env vars.
    pub fn from_env() -> Self {
        Self::new(&config::inference_base_url(), config::inference_timeout_secs())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_connect() {
            InferenceError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            InferenceError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            InferenceError::HttpClient(e.to_string())
        }
    }
}

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    /// Base64-encoded images for vision models.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    format: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`.
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Response body from `/api/tags`.
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl InferenceClient for OllamaClient {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: request.model,
            prompt: request.prompt,
            system: request.system,
            images: request.images.clone(),
            format: "json",
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaTagsResponse = response
            .json()
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Mock inference client for tests — plays back scripted responses in order
/// and counts calls.
pub struct MockInferenceClient {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, InferenceError>>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockInferenceClient {
    /// Mock that always returns the same response.
    pub fn always(response: &str) -> Self {
        Self::scripted(vec![Ok(response.to_string())])
    }

    /// Mock that plays back the given results in order, repeating the last
    /// one once the script is exhausted.
    pub fn scripted(responses: Vec<Result<String, InferenceError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into_iter().collect()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Mock whose every call fails with a connection error.
    pub fn unreachable() -> Self {
        Self::scripted(vec![Err(InferenceError::Connection(
            "http://localhost:11434".into(),
        ))])
    }

    /// How many generate calls have been made.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn next_response(&self) -> Result<String, InferenceError> {
        let mut queue = self.responses.lock().expect("mock lock");
        if queue.len() > 1 {
            queue.pop_front().expect("non-empty")
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(InferenceError::HttpClient("mock script exhausted".into())))
        }
    }
}

impl InferenceClient for MockInferenceClient {
    fn generate(&self, _request: &GenerateRequest<'_>) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.next_response()
    }

    fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        Ok(vec!["llama3.2-vision".into(), "llama3.1:8b".into()])
    }
}
