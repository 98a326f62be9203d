// All LLM prompt constants for the Listing Builder.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona for listing copy. `JSON_ONLY_SYSTEM` is appended at call time.
pub const LISTING_SYSTEM: &str = "You are an expert e-commerce SEO copywriter. \
    You write marketplace listings that rank in search and convert browsers into buyers.";

/// Listing copy prompt template. Replace `{description}` before sending.
pub const LISTING_PROMPT_TEMPLATE: &str = r#"Write a marketplace listing for the product below.

Product description: "{description}"

Requirements:
1. An eye-catching, SEO-optimized product title of at most 80 characters.
2. Exactly 10 high-converting search keywords.
3. A detailed, SEO-friendly long description of roughly 200 words that uses the keywords naturally.
4. Exactly 5 key features or benefits, one short bullet each.

Return a JSON object with the fields "title", "keywords", "longDescription" and "features"."#;

/// Builds the system instruction sent with every listing request.
pub fn listing_system() -> String {
    format!("{LISTING_SYSTEM} {JSON_ONLY_SYSTEM}")
}

/// Builds the user prompt for one product description.
pub fn listing_prompt(description: &str) -> String {
    LISTING_PROMPT_TEMPLATE.replace("{description}", description)
}

/// Response schema handed to the model so its output matches `GeneratedContent`.
pub fn listing_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "SEO optimized product title"
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 10 search keywords"
            },
            "longDescription": {
                "type": "STRING",
                "description": "Detailed product description"
            },
            "features": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "5 key product features"
            }
        },
        "required": ["title", "keywords", "longDescription", "features"]
    })
}
