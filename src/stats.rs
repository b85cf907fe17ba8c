//! Shared per-call history statistics
//!
//! Several prediction methods and the ensemble scorer need the same
//! sub-quantities (volatility, trend, weekday profile). They are computed
//! once per forecast call here and passed down, instead of each consumer
//! re-deriving its own drifting copy.

use crate::data::RevenueSeries;
use chrono::{Datelike, Weekday};
use statrs::statistics::Statistics;

/// Summary statistics over the caller-supplied revenue history
#[derive(Debug, Clone)]
pub struct HistoryStats {
    /// Number of daily observations
    pub len: usize,
    /// Mean daily revenue
    pub mean: f64,
    /// Sample standard deviation of daily revenue
    pub std: f64,
    /// Coefficient of variation (std / mean), 0 for a zero mean
    pub cv: f64,
    /// Normalized weekly trend: regression slope × 7 / mean, clamped
    pub trend: f64,
    /// Share of variance explained by the weekday profile, in [0, 1]
    pub seasonality_strength: f64,
    /// Mean revenue per weekday, Monday first (overall mean where unseen)
    pub weekday_means: [f64; 7],
    /// Observation count per weekday, Monday first
    pub weekday_counts: [usize; 7],
    /// Trailing monthly revenue totals, oldest first
    pub monthly_totals: Vec<f64>,
}

impl HistoryStats {
    /// Compute all statistics for one forecast call
    pub fn compute(series: &RevenueSeries, coverage_months: usize) -> Self {
        let values = series.values();
        let len = values.len();

        let mean = mean(&values);
        let std = std_dev(&values);
        let cv = if mean > 0.0 { std / mean } else { 0.0 };

        let slope = regression_slope(&values);
        let trend = if mean > 0.0 {
            (slope * 7.0 / mean).clamp(-0.3, 0.3)
        } else {
            0.0
        };

        let mut weekday_sums = [0.0; 7];
        let mut weekday_counts = [0usize; 7];
        for obs in series.observations() {
            let idx = obs.date.weekday().num_days_from_monday() as usize;
            weekday_sums[idx] += obs.daily_revenue;
            weekday_counts[idx] += 1;
        }

        let mut weekday_means = [mean; 7];
        for idx in 0..7 {
            if weekday_counts[idx] > 0 {
                weekday_means[idx] = weekday_sums[idx] / weekday_counts[idx] as f64;
            }
        }

        let seasonality_strength = seasonality_strength(&values, &weekday_means, &weekday_counts);

        Self {
            len,
            mean,
            std,
            cv,
            trend,
            seasonality_strength,
            weekday_means,
            weekday_counts,
            monthly_totals: series.monthly_totals(coverage_months),
        }
    }

    /// Mean revenue for a weekday
    pub fn weekday_mean(&self, weekday: Weekday) -> f64 {
        self.weekday_means[weekday.num_days_from_monday() as usize]
    }

    /// Observation count for a weekday
    pub fn weekday_count(&self, weekday: Weekday) -> usize {
        self.weekday_counts[weekday.num_days_from_monday() as usize]
    }

    /// Coefficient of variation of the monthly totals
    pub fn monthly_cv(&self) -> f64 {
        let m = mean(&self.monthly_totals);
        if m <= 0.0 {
            return 0.0;
        }
        std_dev(&self.monthly_totals) / m
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation, 0 with fewer than 2 values
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().std_dev()
}

/// Ordinary least-squares slope over index positions, 0 with fewer than 2 values
pub fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Linearly interpolated percentile (0–100) of an unsorted slice
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        return sorted[low];
    }
    let frac = rank - low as f64;
    sorted[low] * (1.0 - frac) + sorted[high] * frac
}

fn seasonality_strength(values: &[f64], weekday_means: &[f64; 7], counts: &[usize; 7]) -> f64 {
    if values.len() < 14 {
        return 0.0;
    }

    let overall_mean = mean(values);
    let total_variance = values
        .iter()
        .map(|v| (v - overall_mean).powi(2))
        .sum::<f64>();
    if total_variance <= 0.0 {
        return 0.0;
    }

    let between_variance: f64 = weekday_means
        .iter()
        .zip(counts.iter())
        .filter(|(_, count)| **count > 0)
        .map(|(m, count)| *count as f64 * (m - overall_mean).powi(2))
        .sum();

    (between_variance / total_variance).clamp(0.0, 1.0)
}
