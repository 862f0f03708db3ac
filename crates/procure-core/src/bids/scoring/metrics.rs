use super::super::domain::Bid;

pub(crate) const MAX_QUALITY_SCORE: f64 = 5.0;
pub(crate) const MAX_COMPLETION_RATE: f64 = 100.0;

/// Vendor performance metrics after the defaulting policy has been applied.
///
/// This is the single place where absent metrics become numbers: a vendor with no
/// history contributes 0 for quality and completion, never a neutral midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VendorMetrics {
    pub quality_score: f64,
    pub completion_rate: f64,
    /// The vendor reported a usable quality rating.
    pub quality_reported: bool,
    pub completion_reported: bool,
}

impl VendorMetrics {
    pub fn from_bid(bid: &Bid) -> Self {
        Self {
            quality_score: metric_or_zero(bid.vendor_quality_score, MAX_QUALITY_SCORE),
            completion_rate: metric_or_zero(bid.vendor_completion_rate, MAX_COMPLETION_RATE),
            quality_reported: is_reported(bid.vendor_quality_score),
            completion_reported: is_reported(bid.vendor_completion_rate),
        }
    }
}

fn is_reported(value: Option<f64>) -> bool {
    value.map(f64::is_finite).unwrap_or(false)
}

/// Default a missing or non-finite metric to zero and clamp it into `0..=max`.
pub(crate) fn metric_or_zero(value: Option<f64>, max: f64) -> f64 {
    match value {
        Some(value) if value.is_finite() => value.clamp(0.0, max),
        _ => 0.0,
    }
}
