use serde::{Deserialize, Serialize};

/// Weights and scale used by the composite bid score.
///
/// The weights sum to 1.0 so every composite stays within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub price: f64,
    pub timeline: f64,
    pub quality: f64,
    pub completion: f64,
    /// Currency units that cost one point of the price term.
    pub price_divisor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            price: 0.30,
            timeline: 0.20,
            quality: 0.30,
            completion: 0.20,
            price_divisor: 10_000.0,
        }
    }
}
