use std::sync::Arc;

use crate::listing::gate::GenerationGate;
use crate::listing::generator::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content generator. Default: GeminiContentGenerator.
    pub generator: Arc<dyn ContentGenerator>,
    /// Process-wide single-flight slot for content generation.
    pub generation_gate: GenerationGate,
}

impl AppState {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator,
            generation_gate: GenerationGate::new(),
        }
    }
}
