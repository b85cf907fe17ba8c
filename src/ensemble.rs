//! Adaptive ensemble combiner
//!
//! Scores each method's reliability for the data at hand, normalizes the
//! scores into weights, combines the sanitized method predictions, and runs
//! the historical post-processing passes over the result.

use crate::calibration::ClampLimit;
use crate::config::EngineConfig;
use crate::methods::{MethodId, MethodPrediction};
use crate::stats::HistoryStats;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Which ensemble variant is in play for a forecast call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnsemblePath {
    /// Volatility/trend/seasonality-scored weighting over the seven standard
    /// methods
    Standard,
    /// Fixed calibration weights over the Bayesian/bootstrap/quantile trio
    Sparse,
}

/// Pick the ensemble path from the number of usable monthly aggregates
pub fn select_path(monthly_points: usize) -> EnsemblePath {
    if monthly_points >= 3 {
        EnsemblePath::Standard
    } else {
        EnsemblePath::Sparse
    }
}

/// Normalized, non-negative per-method weights summing to 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleWeights {
    entries: Vec<(MethodId, f64)>,
}

impl EnsembleWeights {
    /// Normalize raw reliability scores into weights
    ///
    /// Negative scores are floored at 0; if every score is 0 the weights fall
    /// back to uniform rather than dividing by zero.
    pub fn from_scores(scores: Vec<(MethodId, f64)>) -> Self {
        let clamped: Vec<(MethodId, f64)> = scores
            .into_iter()
            .map(|(method, score)| (method, score.max(0.0)))
            .collect();

        let total: f64 = clamped.iter().map(|(_, score)| score).sum();
        if total <= 0.0 {
            let uniform = 1.0 / clamped.len() as f64;
            return Self {
                entries: clamped
                    .into_iter()
                    .map(|(method, _)| (method, uniform))
                    .collect(),
            };
        }

        Self {
            entries: clamped
                .into_iter()
                .map(|(method, score)| (method, score / total))
                .collect(),
        }
    }

    /// Weight for one method, 0 when absent
    pub fn get(&self, method: MethodId) -> f64 {
        self.entries
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// All (method, weight) entries
    pub fn entries(&self) -> &[(MethodId, f64)] {
        &self.entries
    }
}

/// Score every active method's reliability for this call's data
pub fn score_methods(
    path: EnsemblePath,
    stats: &HistoryStats,
    config: &EngineConfig,
) -> EnsembleWeights {
    match path {
        EnsemblePath::Standard => standard_scores(stats, config),
        EnsemblePath::Sparse => sparse_scores(config),
    }
}

fn standard_scores(stats: &HistoryStats, config: &EngineConfig) -> EnsembleWeights {
    let cfg = &config.ensemble;
    let mut scores: Vec<(MethodId, f64)> = MethodId::STANDARD
        .iter()
        .map(|method| (*method, cfg.base_score))
        .collect();

    let mut boost = |method: MethodId, amount: f64| {
        if let Some(entry) = scores.iter_mut().find(|(m, _)| *m == method) {
            entry.1 += amount;
        }
    };

    // Choppy data favors the smoothing-style methods
    if stats.cv > cfg.high_volatility_cv {
        boost(MethodId::MovingAverage, cfg.volatility_moving_average_boost);
        boost(MethodId::Linear, cfg.volatility_linear_boost);
        boost(MethodId::Nonlinear, cfg.volatility_nonlinear_boost);
    }

    // A persistent trend favors the trend-following methods
    if stats.trend.abs() > cfg.strong_trend {
        boost(MethodId::Exponential, cfg.trend_exponential_boost);
        boost(MethodId::SeasonalAr, cfg.trend_seasonal_ar_boost);
        boost(MethodId::RuleEnsemble, cfg.trend_rule_ensemble_boost);
    }

    // A pronounced weekday profile favors the seasonal methods
    if stats.seasonality_strength > cfg.strong_seasonality {
        boost(MethodId::SeasonalAr, cfg.seasonality_seasonal_ar_boost);
        boost(MethodId::Kernel, cfg.seasonality_kernel_boost);
    }

    if stats.len < cfg.short_history_days {
        boost(MethodId::Linear, cfg.short_history_linear_boost);
        boost(MethodId::MovingAverage, cfg.short_history_moving_average_boost);
    }

    EnsembleWeights::from_scores(scores)
}

fn sparse_scores(config: &EngineConfig) -> EnsembleWeights {
    let cfg = &config.sparse;
    EnsembleWeights::from_scores(vec![
        (MethodId::Bayesian, cfg.bayesian_weight),
        (MethodId::Bootstrap, cfg.bootstrap_weight),
        (MethodId::Quantile, cfg.quantile_weight),
    ])
}

/// Weighted sum of the sanitized method predictions
pub fn combine(predictions: &[MethodPrediction], weights: &EnsembleWeights) -> f64 {
    predictions
        .iter()
        .map(|p| weights.get(p.method) * p.value)
        .sum()
}

/// Historical post-processing over the combined prediction
///
/// Clamps to the historical limit, blends extreme deviations back toward the
/// mean, clips to the weekday band around base revenue, applies the final
/// seasonal adjustment and re-clamps. The result is never negative.
pub fn post_process(
    combined: f64,
    base_revenue: f64,
    date: NaiveDate,
    weekday: Weekday,
    clamp: &ClampLimit,
    config: &EngineConfig,
) -> f64 {
    let cfg = &config.ensemble;
    let mut value = clamp.apply(combined);

    if clamp.std > 0.0 && (value - clamp.mean).abs() > cfg.outlier_sigma * clamp.std {
        value = cfg.outlier_blend_result * value + cfg.outlier_blend_mean * clamp.mean;
    }

    if base_revenue > 0.0 {
        let (band_min, band_max) = cfg.weekday_bands[weekday.num_days_from_monday() as usize];
        value = value.clamp(base_revenue * band_min, base_revenue * band_max);
    }

    let seasonal = &config.seasonal;
    let adjustment = (seasonal.month_multiplier(date.month())
        + seasonal.weekday_multiplier(weekday))
        / 2.0;
    value *= adjustment;

    clamp.apply(value).max(0.0)
}
