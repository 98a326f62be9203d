//! Axum route handlers for the Listing Builder API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listing::models::GeneratedContent;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateListingRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateListingResponse {
    pub request_id: Uuid,
    pub content: GeneratedContent,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GenerationStatusResponse {
    pub in_progress: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/listing/generate
///
/// Generates title, keywords, long description and feature bullets.
/// Refuses with 409 while another generation is in flight.
pub async fn handle_generate_listing(
    State(state): State<AppState>,
    request: Result<Json<GenerateListingRequest>, JsonRejection>,
) -> Result<Json<GenerateListingResponse>, AppError> {
    let Json(request) = request?;
    let description = request.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let _guard = state
        .generation_gate
        .try_begin()
        .ok_or(AppError::GenerationInProgress)?;

    let request_id = Uuid::new_v4();
    info!(%request_id, chars = description.chars().count(), "Generating listing content");

    let content = state.generator.generate(description).await?;

    info!(%request_id, "Listing content ready");

    Ok(Json(GenerateListingResponse {
        request_id,
        content,
        generated_at: Utc::now(),
    }))
}

/// GET /api/v1/listing/status
pub async fn handle_generation_status(
    State(state): State<AppState>,
) -> Json<GenerationStatusResponse> {
    Json(GenerationStatusResponse {
        in_progress: state.generation_gate.is_busy(),
    })
}
