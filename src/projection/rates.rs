//! Rate conversions used by the projection

use crate::params::RateType;

/// Convert a quoted percentage into the effective monthly rate as a decimal.
///
/// An annual quote is converted with the compounding-equivalent formula
/// `(1 + r)^(1/12) - 1`, so twelve months of the result compound back to `r`.
pub fn effective_monthly_rate(rate_pct: f64, rate_type: RateType) -> f64 {
    match rate_type {
        RateType::Monthly => rate_pct / 100.0,
        RateType::Annual => (1.0 + rate_pct / 100.0).powf(1.0 / 12.0) - 1.0,
    }
}

/// Cumulative inflation over `months`, compounding an annual percentage
/// over fractional years
pub fn inflation_factor(annual_inflation_pct: f64, months: u32) -> f64 {
    (1.0 + annual_inflation_pct / 100.0).powf(months as f64 / 12.0)
}
