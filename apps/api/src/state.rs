use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only; per-request data never lives here.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production, a scripted stub in tests.
    pub llm: Arc<dyn CompletionService>,
    pub extractor: TextExtractor,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionService>, config: Config) -> Self {
        Self {
            extractor: TextExtractor::new(llm.clone()),
            llm,
            config,
        }
    }
}
