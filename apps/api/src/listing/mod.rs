// Listing Builder: AI-written marketplace copy for a short product description.
// All LLM calls go through llm_client. One generation may be in flight at a time.

pub mod gate;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
