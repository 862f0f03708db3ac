mod config;
mod metrics;

pub use config::ScoreWeights;
pub use metrics::VendorMetrics;

use super::domain::Bid;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the weighted composite formula to a bid.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Composite score in `0..=100`.
    pub fn score(&self, bid: &Bid) -> u8 {
        let total: f64 = self
            .breakdown(bid)
            .iter()
            .map(|component| component.weighted)
            .sum();

        total.round().clamp(0.0, 100.0) as u8
    }

    /// Per-factor contributions, in formula order, for audit display.
    pub fn breakdown(&self, bid: &Bid) -> Vec<ScoreComponent> {
        let metrics = VendorMetrics::from_bid(bid);
        let weights = &self.weights;

        let divisor = if weights.price_divisor > 0.0 {
            weights.price_divisor
        } else {
            1.0
        };
        let price_term = (100.0 - bid.total_price / divisor).max(0.0);
        let timeline_term = (100.0 - f64::from(bid.delivery_timeline_days)).max(0.0);
        let quality_term = metrics.quality_score * 20.0;
        let completion_term = metrics.completion_rate;

        let history_note = |present: bool, detail: String| {
            if present {
                detail
            } else {
                "no performance history".to_string()
            }
        };

        vec![
            ScoreComponent::new(
                ScoreFactor::Price,
                price_term,
                weights.price,
                format!("{:.2} {} quoted", bid.total_price, bid.currency),
            ),
            ScoreComponent::new(
                ScoreFactor::Timeline,
                timeline_term,
                weights.timeline,
                format!("{} day(s) to deliver", bid.delivery_timeline_days),
            ),
            ScoreComponent::new(
                ScoreFactor::Quality,
                quality_term,
                weights.quality,
                history_note(
                    metrics.quality_reported,
                    format!("quality rating {:.1}/5", metrics.quality_score),
                ),
            ),
            ScoreComponent::new(
                ScoreFactor::Completion,
                completion_term,
                weights.completion,
                history_note(
                    metrics.completion_reported,
                    format!("{:.0}% orders completed", metrics.completion_rate),
                ),
            ),
        ]
    }
}

/// Signals that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Price,
    Timeline,
    Quality,
    Completion,
}

impl ScoreFactor {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreFactor::Price => "Price",
            ScoreFactor::Timeline => "Timeline",
            ScoreFactor::Quality => "Quality",
            ScoreFactor::Completion => "Completion",
        }
    }
}

/// Discrete contribution to a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    /// Term on the 0..=100 scale before weighting.
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
    pub notes: String,
}

impl ScoreComponent {
    fn new(factor: ScoreFactor, raw: f64, weight: f64, notes: String) -> Self {
        Self {
            factor,
            raw,
            weight,
            weighted: raw * weight,
            notes,
        }
    }
}
