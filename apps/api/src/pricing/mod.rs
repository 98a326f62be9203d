//! Pricing Engine — back-solves the buyer-facing listing price from the net
//! settlement a seller wants to receive after marketplace deductions.
//!
//! The listing price `P` must satisfy:
//! - platform fee = `P × platform%`
//! - GST          = `(P − shipping) × gst%`
//! - settlement   = `P − platform fee − GST − fixed fee − shipping`
//!
//! The divisor linearizes the GST-on-fee interaction as
//! `1 − platform − gst × (1 + platform)` instead of solving the exact system.
//! Keep it that way: quoted prices must match what sellers already see.
//!
//! Pure and synchronous. No state, safe to call on every keystroke.

pub mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

/// A seller's fee structure. Missing JSON fields fall back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfiguration {
    /// Amount the seller wants credited after every deduction.
    pub target_net_settlement: f64,
    /// Tax rate on (listing price − shipping), in percent.
    pub gst_percentage: f64,
    /// Passed through to the buyer; excluded from the GST base.
    pub shipping_charges: f64,
    /// Marketplace commission on the full listing price, in percent.
    pub platform_fee_percentage: f64,
    /// Flat per-transaction fee.
    pub fixed_fee: f64,
}

impl Default for FeeConfiguration {
    fn default() -> Self {
        Self {
            target_net_settlement: 1000.0,
            gst_percentage: 18.0,
            shipping_charges: 80.0,
            platform_fee_percentage: 10.0,
            fixed_fee: 20.0,
        }
    }
}

/// Derived on every computation; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub listing_price: i64,
    pub gst_amount: i64,
    /// Platform commission + fixed fee + shipping.
    pub total_fees: i64,
    /// Echo of `target_net_settlement`.
    pub net_settlement: f64,
}

/// One slice of the settlement chart shown next to the calculator.
/// Settlement and shipping are the seller's own figures, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub name: &'static str,
    pub value: f64,
}

/// Problems a caller may want to reject before pricing.
/// The engine never raises these; see `FeeConfiguration::validate`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be at least 0 and below 100 (got {value})")]
    PercentageOutOfRange { field: &'static str, value: f64 },

    #[error("fee percentages consume the whole listing price (divisor {divisor:.4})")]
    DegenerateFees { divisor: f64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

impl FeeConfiguration {
    /// Share of the listing price left after platform fee and GST.
    pub fn divisor(&self) -> f64 {
        let platform_decimal = self.platform_fee_percentage / 100.0;
        let gst_decimal = self.gst_percentage / 100.0;
        1.0 - platform_decimal - gst_decimal * (1.0 + platform_decimal)
    }

    /// Every reason this configuration is economically meaningless.
    pub fn issues(&self) -> Vec<PricingError> {
        let mut issues = Vec::new();

        let amounts = [
            ("target_net_settlement", self.target_net_settlement),
            ("shipping_charges", self.shipping_charges),
            ("fixed_fee", self.fixed_fee),
        ];
        let percentages = [
            ("gst_percentage", self.gst_percentage),
            ("platform_fee_percentage", self.platform_fee_percentage),
        ];

        for (field, value) in amounts {
            if !value.is_finite() {
                issues.push(PricingError::NonFinite { field });
            } else if value < 0.0 {
                issues.push(PricingError::NegativeAmount { field, value });
            }
        }

        for (field, value) in percentages {
            if !value.is_finite() {
                issues.push(PricingError::NonFinite { field });
            } else if !(0.0..100.0).contains(&value) {
                issues.push(PricingError::PercentageOutOfRange { field, value });
            }
        }

        let divisor = self.divisor();
        if divisor.is_finite() && divisor <= 0.0 {
            issues.push(PricingError::DegenerateFees { divisor });
        }

        issues
    }

    /// Fails with the first issue found, if any.
    pub fn validate(&self) -> Result<(), PricingError> {
        match self.issues().into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core computation
// ────────────────────────────────────────────────────────────────────────────

/// Computes the listing price and its breakdown.
///
/// Total over all inputs: a divisor ≤ 0 (or NaN) prices the listing at 0,
/// and a negative price is clamped to 0. A divisor of exactly 0 also prices
/// at 0; the seller calculator this replaces divided by 1 in that case and
/// quoted the bare numerator. Every output field is rounded on
/// its own from the unrounded price, so the parts need not sum to the whole.
pub fn compute_pricing(config: &FeeConfiguration) -> PricingResult {
    let platform_decimal = config.platform_fee_percentage / 100.0;
    let gst_decimal = config.gst_percentage / 100.0;
    let divisor = config.divisor();

    let numerator = config.target_net_settlement + config.shipping_charges + config.fixed_fee;

    let listing_price = if divisor > 0.0 {
        // f64::max drops NaN, so a NaN numerator also lands on 0.
        (numerator / divisor).max(0.0)
    } else {
        0.0
    };

    let platform_fee = listing_price * platform_decimal;
    let gst = (listing_price - config.shipping_charges) * gst_decimal;
    let total_fees = platform_fee + config.fixed_fee + config.shipping_charges;

    PricingResult {
        listing_price: round_currency(listing_price),
        gst_amount: round_currency(gst),
        total_fees: round_currency(total_fees),
        net_settlement: config.target_net_settlement,
    }
}

/// Settlement chart: where the listing price goes.
///
/// `Fees` is recomputed from the rounded listing price, without shipping.
pub fn cost_breakdown(config: &FeeConfiguration, result: &PricingResult) -> Vec<BreakdownSlice> {
    let fees = config.platform_fee_percentage * result.listing_price as f64 / 100.0
        + config.fixed_fee;

    vec![
        BreakdownSlice {
            name: "Settlement",
            value: result.net_settlement,
        },
        BreakdownSlice {
            name: "Shipping",
            value: config.shipping_charges,
        },
        BreakdownSlice {
            name: "Fees",
            value: round_currency(fees) as f64,
        },
        BreakdownSlice {
            name: "GST",
            value: result.gst_amount as f64,
        },
    ]
}

/// Nearest whole currency unit, halves toward +∞ (2.5 → 3, −2.5 → −2).
/// Decided on the exact fractional part: `value + 0.5` itself rounds, which
/// pushes 0.49999999999999994 and odd integers above 2^52 up by one.
/// `as` saturates, so infinities pin to the i64 bounds and NaN becomes 0.
fn round_currency(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}
