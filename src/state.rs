//! Shared application state — transport-agnostic wiring of the registry,
//! AI services, pipeline, and review queue.
//!
//! Built once at startup and shared via `Arc`; no mutable cross-request
//! state beyond the help cache and review queue, which guard themselves.

use std::sync::Arc;

use crate::config;
use crate::inference::{
    AiProductSearch, HelpTextService, InferenceClient, OllamaClient, SerialExtractionService,
};
use crate::registry::{ProductLookup, StaticRegistry};
use crate::resolve::ResolutionPipeline;
use crate::review::ReviewQueue;

pub struct AppState {
    pub inference: Arc<dyn InferenceClient>,
    pub extraction: SerialExtractionService,
    pub help: HelpTextService,
    pub pipeline: ResolutionPipeline,
    pub review: ReviewQueue,
}

impl AppState {
    /// Production wiring: env-configured Ollama client, demo registry.
    pub fn from_env() -> Self {
        Self::with_parts(
            Arc::new(OllamaClient::from_env()),
            Arc::new(StaticRegistry::with_demo_products()),
        )
    }

    /// Explicit wiring — the seam tests use to substitute mocks.
    pub fn with_parts(
        inference: Arc<dyn InferenceClient>,
        registry: Arc<dyn ProductLookup>,
    ) -> Self {
        let search = Arc::new(AiProductSearch::new(
            inference.clone(),
            config::text_model(),
            config::vision_model(),
        ));

        Self {
            extraction: SerialExtractionService::new(inference.clone(), config::vision_model()),
            help: HelpTextService::new(inference.clone(), config::text_model()),
            pipeline: ResolutionPipeline::new(registry, search),
            review: ReviewQueue::new(),
            inference,
        }
    }
}
