//! Forecast confidence estimation
//!
//! Five bounded sub-confidences combined with fixed weights, dampened by the
//! weekend instability factor and by horizon distance.

use crate::config::ConfidenceConfig;
use crate::ensemble::EnsemblePath;
use crate::stats::HistoryStats;
use chrono::Weekday;

/// Estimate the confidence for one forecast day
///
/// `horizon_day` is the 0-based position of the day within the horizon;
/// confidence decays for days beyond the first week.
pub fn estimate(
    path: EnsemblePath,
    stats: &HistoryStats,
    weekday: Weekday,
    horizon_day: usize,
    config: &ConfidenceConfig,
) -> f64 {
    let components = [
        weekday_volume_confidence(stats, weekday, config),
        stability_confidence(stats, config),
        config.weekday_table[weekday.num_days_from_monday() as usize],
        overall_volume_confidence(stats, config),
        data_quality_confidence(stats, config),
    ];

    let mut confidence: f64 = components
        .iter()
        .zip(config.component_weights)
        .map(|(component, weight)| component * weight)
        .sum();

    confidence *= match weekday {
        Weekday::Fri => config.friday_factor,
        Weekday::Sat => config.saturday_factor,
        Weekday::Sun => config.sunday_factor,
        _ => 1.0,
    };

    let (low, high) = match path {
        EnsemblePath::Standard => config.standard_range,
        EnsemblePath::Sparse => config.sparse_range,
    };
    confidence = confidence.clamp(low, high);

    if horizon_day >= 7 {
        let elapsed = (horizon_day - 7 + 1) as f64;
        let decayed = confidence * (1.0 - config.horizon_decay_per_day * elapsed);
        let floor = match path {
            EnsemblePath::Standard => config.decay_floor,
            EnsemblePath::Sparse => low,
        };
        confidence = decayed.max(floor);
    }

    confidence
}

/// Saturating function of the same-weekday sample count
fn weekday_volume_confidence(
    stats: &HistoryStats,
    weekday: Weekday,
    config: &ConfidenceConfig,
) -> f64 {
    let n = stats.weekday_count(weekday) as f64;
    (n / config.weekday_volume_target).min(1.0)
}

/// Inverse function of the monthly coefficient of variation
fn stability_confidence(stats: &HistoryStats, config: &ConfidenceConfig) -> f64 {
    1.0 / (1.0 + config.monthly_cv_sensitivity * stats.monthly_cv())
}

/// Saturating function of the total observation count
fn overall_volume_confidence(stats: &HistoryStats, config: &ConfidenceConfig) -> f64 {
    (stats.len as f64 / config.overall_volume_target).min(1.0)
}

/// Blend of sample count, monthly coverage and non-zero-month fraction
fn data_quality_confidence(stats: &HistoryStats, config: &ConfidenceConfig) -> f64 {
    let sample_score = (stats.len as f64 / config.quality_sample_target).min(1.0);
    let coverage_score =
        (stats.monthly_totals.len() as f64 / config.coverage_months as f64).min(1.0);
    let non_zero_months = stats.monthly_totals.iter().filter(|t| **t > 0.0).count();
    let non_zero_score = if stats.monthly_totals.is_empty() {
        0.0
    } else {
        non_zero_months as f64 / stats.monthly_totals.len() as f64
    };

    let [sample_weight, coverage_weight, non_zero_weight] = config.quality_weights;
    sample_weight * sample_score + coverage_weight * coverage_score
        + non_zero_weight * non_zero_score
}
