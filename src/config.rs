//! Application constants and environment-derived settings.
//!
//! Everything here has a working default so the server starts with no
//! configuration at all (local Ollama, demo registry, loopback bind).

use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "PartLens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Image reference used for AI-sourced products when no upload is held locally.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x400.png";

/// Maximum decoded upload size (4 MB) — what a phone camera photo compresses
/// to, with headroom for small multi-page PDFs.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Base URL of the inference backend (Ollama-compatible HTTP API).
pub fn inference_base_url() -> String {
    std::env::var("PARTLENS_OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Vision-capable model used for serial extraction and image-grounded search.
pub fn vision_model() -> String {
    std::env::var("PARTLENS_VISION_MODEL").unwrap_or_else(|_| "llama3.2-vision".to_string())
}

/// Text model used for help text and serial-only product search.
pub fn text_model() -> String {
    std::env::var("PARTLENS_TEXT_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string())
}

/// Per-call timeout for inference requests, in seconds.
///
/// Expiry is treated as a call failure by the caller, same as any other
/// transport error.
pub fn inference_timeout_secs() -> u64 {
    std::env::var("PARTLENS_INFERENCE_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120)
}

/// Address the HTTP API binds to.
pub fn bind_addr() -> SocketAddr {
    std::env::var("PARTLENS_BIND_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8990)))
}

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}
