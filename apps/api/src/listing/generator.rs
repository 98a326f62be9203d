//! Content Generator — pluggable, trait-based source of listing copy.
//!
//! Default: `GeminiContentGenerator` (one `generateContent` call, no retry).
//! `AppState` holds an `Arc<dyn ContentGenerator>`; tests swap in stubs.

use async_trait::async_trait;
use tracing::debug;

use crate::listing::models::GeneratedContent;
use crate::listing::prompts::{listing_prompt, listing_response_schema, listing_system};
use crate::llm_client::{LlmClient, LlmError};

/// Turns a short product description into listing copy.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, description: &str) -> Result<GeneratedContent, LlmError>;
}

pub struct GeminiContentGenerator(pub LlmClient);

#[async_trait]
impl ContentGenerator for GeminiContentGenerator {
    async fn generate(&self, description: &str) -> Result<GeneratedContent, LlmError> {
        let schema = listing_response_schema();
        let content: GeneratedContent = self
            .0
            .call_json(&listing_prompt(description), &listing_system(), Some(&schema))
            .await?;

        content.validate()?;

        debug!(
            keywords = content.keywords.len(),
            features = content.features.len(),
            "Listing content generated"
        );
        Ok(content)
    }
}
