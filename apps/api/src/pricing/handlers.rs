//! Axum route handlers for the Pricing API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::pricing::{
    compute_pricing, cost_breakdown, BreakdownSlice, FeeConfiguration, PricingResult,
};

#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    /// Reject economically meaningless configurations instead of pricing them.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub config: FeeConfiguration,
    pub result: PricingResult,
    pub breakdown: Vec<BreakdownSlice>,
    pub warnings: Vec<String>,
}

impl PricingResponse {
    fn for_config(config: FeeConfiguration) -> Self {
        let result = compute_pricing(&config);
        let breakdown = cost_breakdown(&config, &result);
        let warnings = config.issues().iter().map(ToString::to_string).collect();
        Self {
            config,
            result,
            breakdown,
            warnings,
        }
    }
}

/// POST /api/v1/pricing
///
/// Prices any configuration and reports its issues as warnings.
/// With `?strict=true` the first issue is returned as a validation error.
pub async fn handle_compute_pricing(
    query: Result<Query<PricingQuery>, QueryRejection>,
    config: Result<Json<FeeConfiguration>, JsonRejection>,
) -> Result<Json<PricingResponse>, AppError> {
    let Query(query) = query?;
    let Json(config) = config?;

    if query.strict {
        config.validate()?;
    }

    let response = PricingResponse::for_config(config);
    debug!(
        listing_price = response.result.listing_price,
        warnings = response.warnings.len(),
        "Computed listing price"
    );

    Ok(Json(response))
}

/// GET /api/v1/pricing/defaults
///
/// The calculator's starting configuration, already priced.
pub async fn handle_pricing_defaults() -> Json<PricingResponse> {
    Json(PricingResponse::for_config(FeeConfiguration::default()))
}
