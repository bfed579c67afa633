//! HTTP interaction surface.
//!
//! Thin presentation layer over the core services: four workflow endpoints
//! (extract, resolve, help, review) plus a health probe, all under `/api/`.
//! The router is composable — `api_router()` can be mounted on any axum
//! server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use types::ApiContext;
