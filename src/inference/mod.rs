//! Generative inference layer.
//!
//! `InferenceClient` is the single transport seam (production: Ollama HTTP,
//! tests: scripted mock). On top of it sit the three AI-backed services —
//! serial extraction, help text, product search — each pairing a versioned
//! prompt template with lenient structured-output parsing.

pub mod extract;
pub mod help;
pub mod ollama;
pub mod prompts;
pub mod response;
pub mod search;
pub mod types;

pub use extract::SerialExtractionService;
pub use help::HelpTextService;
pub use ollama::OllamaClient;
pub use search::{AiProductSearch, ProductInfo, ProductSearch, SearchVerdict};
pub use types::{GenerateRequest, InferenceClient, InferenceError};
