use serde::{Deserialize, Serialize};

use crate::llm_client::LlmError;

/// Listing copy produced by the model.
/// Field names follow the model's response schema (`longDescription`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub title: String,
    pub keywords: Vec<String>,
    pub long_description: String,
    pub features: Vec<String>,
}

impl GeneratedContent {
    /// Rejects responses that parse but cannot be shown as a listing.
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.title.trim().is_empty() {
            return Err(LlmError::Schema("title is empty".to_string()));
        }
        if self.long_description.trim().is_empty() {
            return Err(LlmError::Schema("longDescription is empty".to_string()));
        }
        Ok(())
    }
}
