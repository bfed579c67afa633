//! PartLens — component identification for shop-floor technicians.
//!
//! A technician uploads a photo or document; serial extraction proposes
//! candidates; the resolution pipeline tries the local registry, then AI
//! search by serial, then AI search with image context; the result (or a
//! manual-review fallback) goes back to the browser UI over the HTTP API.

pub mod api;
pub mod config;
pub mod data_uri;
pub mod inference;
pub mod registry;
pub mod resolve;
pub mod review;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, falling back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
