//! Historical calibration of the revenue clamp limit

use crate::stats;
use serde::{Deserialize, Serialize};

/// Upper bound on predicted revenue, derived from history once per forecast
/// call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampLimit {
    /// Mean of the valid historical values
    pub mean: f64,
    /// Standard deviation of the valid historical values
    pub std: f64,
    /// Limit: `max(3 * mean, mean + 3 * std)`
    pub limit: f64,
}

impl ClampLimit {
    /// Derive the clamp limit from trailing revenue values
    ///
    /// Non-positive and non-finite entries are discarded. With fewer than 2
    /// valid samples the standard deviation falls back to 15% of the mean.
    pub fn derive(values: &[f64]) -> Self {
        let valid: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        if valid.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                limit: 0.0,
            };
        }

        let mean = stats::mean(&valid);
        let std = if valid.len() >= 2 {
            stats::std_dev(&valid)
        } else {
            mean * 0.15
        };

        let limit = (3.0 * mean).max(mean + 3.0 * std);

        Self { mean, std, limit }
    }

    /// Clamp a prediction to the limit
    pub fn apply(&self, value: f64) -> f64 {
        value.min(self.limit)
    }
}
