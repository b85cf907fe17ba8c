use assert_approx_eq::assert_approx_eq;
use chrono::{Datelike, Duration, NaiveDate};
use revenue_forecast::ensemble::{self, EnsemblePath, EnsembleWeights};
use revenue_forecast::methods::{MethodId, MethodPrediction};
use revenue_forecast::stats::HistoryStats;
use revenue_forecast::{ClampLimit, EngineConfig, RevenueSeries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_series(start: NaiveDate, values: &[f64]) -> RevenueSeries {
    RevenueSeries::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (start + Duration::days(i as i64), *v))
            .collect(),
    )
    .unwrap()
}

fn assert_weights_valid(weights: &EnsembleWeights) {
    let total: f64 = weights.entries().iter().map(|(_, w)| w).sum();
    assert_approx_eq!(total, 1.0, 1e-9);
    for (method, weight) in weights.entries() {
        assert!(*weight >= 0.0, "negative weight for {method:?}");
    }
}

#[test]
fn test_select_path_by_monthly_points() {
    assert_eq!(ensemble::select_path(0), EnsemblePath::Sparse);
    assert_eq!(ensemble::select_path(2), EnsemblePath::Sparse);
    assert_eq!(ensemble::select_path(3), EnsemblePath::Standard);
    assert_eq!(ensemble::select_path(6), EnsemblePath::Standard);
}

#[test]
fn test_weights_normalize_to_one() {
    let weights = EnsembleWeights::from_scores(vec![
        (MethodId::Linear, 2.0),
        (MethodId::Exponential, 1.0),
        (MethodId::MovingAverage, 1.0),
    ]);

    assert_weights_valid(&weights);
    assert_approx_eq!(weights.get(MethodId::Linear), 0.5, 1e-9);
}

#[test]
fn test_negative_scores_are_floored() {
    let weights = EnsembleWeights::from_scores(vec![
        (MethodId::Linear, -5.0),
        (MethodId::Exponential, 1.0),
    ]);

    assert_weights_valid(&weights);
    assert_eq!(weights.get(MethodId::Linear), 0.0);
    assert_approx_eq!(weights.get(MethodId::Exponential), 1.0, 1e-9);
}

#[test]
fn test_degenerate_scores_fall_back_to_uniform() {
    let weights = EnsembleWeights::from_scores(vec![
        (MethodId::Linear, 0.0),
        (MethodId::Exponential, -1.0),
        (MethodId::MovingAverage, 0.0),
        (MethodId::Kernel, 0.0),
    ]);

    assert_weights_valid(&weights);
    for (_, weight) in weights.entries() {
        assert_approx_eq!(*weight, 0.25, 1e-9);
    }
}

#[test]
fn test_volatile_history_boosts_moving_average() {
    let config = EngineConfig::default();
    // Alternating days: high volatility, negligible trend
    let values: Vec<f64> = (0..60)
        .map(|i| if i % 2 == 0 { 500.0 } else { 1500.0 })
        .collect();
    let series = daily_series(date(2024, 1, 1), &values);
    let stats = HistoryStats::compute(&series, 6);
    assert!(stats.cv > 0.3);

    let weights = ensemble::score_methods(EnsemblePath::Standard, &stats, &config);

    assert_weights_valid(&weights);
    assert!(weights.get(MethodId::MovingAverage) > weights.get(MethodId::Exponential));
}

#[test]
fn test_trending_history_boosts_exponential() {
    let config = EngineConfig::default();
    // Steady climb: strong trend, low volatility
    let values: Vec<f64> = (0..60).map(|i| 1000.0 + 30.0 * i as f64).collect();
    let series = daily_series(date(2024, 1, 1), &values);
    let stats = HistoryStats::compute(&series, 6);
    assert!(stats.trend.abs() > 0.1);

    let weights = ensemble::score_methods(EnsemblePath::Standard, &stats, &config);

    assert_weights_valid(&weights);
    assert!(weights.get(MethodId::Exponential) > weights.get(MethodId::Nonlinear));
}

#[test]
fn test_sparse_weights_favor_bayesian() {
    let config = EngineConfig::default();
    let series = daily_series(date(2024, 1, 1), &[1000.0; 14]);
    let stats = HistoryStats::compute(&series, 6);

    let weights = ensemble::score_methods(EnsemblePath::Sparse, &stats, &config);

    assert_weights_valid(&weights);
    assert_approx_eq!(weights.get(MethodId::Bayesian), 0.5, 1e-9);
    assert!(weights.get(MethodId::Bayesian) > weights.get(MethodId::Bootstrap));
    assert!(weights.get(MethodId::Bootstrap) > weights.get(MethodId::Quantile));
    // Standard methods carry no weight on the sparse path
    assert_eq!(weights.get(MethodId::Linear), 0.0);
}

#[test]
fn test_combine_is_the_weighted_sum() {
    let weights = EnsembleWeights::from_scores(vec![
        (MethodId::Linear, 3.0),
        (MethodId::Exponential, 1.0),
    ]);
    let predictions = vec![
        MethodPrediction {
            method: MethodId::Linear,
            value: 1000.0,
        },
        MethodPrediction {
            method: MethodId::Exponential,
            value: 2000.0,
        },
    ];

    assert_approx_eq!(ensemble::combine(&predictions, &weights), 1250.0, 1e-9);
}

#[test]
fn test_post_process_blends_outliers_toward_mean() {
    let config = EngineConfig::default();
    let clamp = ClampLimit {
        mean: 1000.0,
        std: 100.0,
        limit: 3000.0,
    };

    // Mid-April Wednesday: seasonal adjustment is exactly 1
    let day = date(2024, 4, 17);
    let result = ensemble::post_process(2000.0, 1000.0, day, day.weekday(), &clamp, &config);

    // Deviation of 10 sigma: 0.7 * 2000 + 0.3 * 1000
    assert_approx_eq!(result, 1700.0, 1e-9);
}

#[test]
fn test_post_process_leaves_ordinary_values_alone() {
    let config = EngineConfig::default();
    let clamp = ClampLimit {
        mean: 1000.0,
        std: 200.0,
        limit: 3000.0,
    };

    let day = date(2024, 4, 17);
    let result = ensemble::post_process(1100.0, 1000.0, day, day.weekday(), &clamp, &config);

    assert_approx_eq!(result, 1100.0, 1e-9);
}

#[test]
fn test_post_process_clips_to_weekday_band() {
    let config = EngineConfig::default();
    let clamp = ClampLimit {
        mean: 1000.0,
        std: 500.0,
        limit: 10_000.0,
    };

    // Wednesday band is (0.55, 1.7) around base revenue
    let day = date(2024, 4, 17);
    let high = ensemble::post_process(2500.0, 1000.0, day, day.weekday(), &clamp, &config);
    let low = ensemble::post_process(100.0, 1000.0, day, day.weekday(), &clamp, &config);

    assert_approx_eq!(high, 1700.0, 1e-9);
    assert_approx_eq!(low, 550.0, 1e-9);
}

#[test]
fn test_post_process_never_exceeds_limit_or_goes_negative() {
    let config = EngineConfig::default();
    let clamp = ClampLimit {
        mean: 1000.0,
        std: 100.0,
        limit: 3000.0,
    };

    let day = date(2024, 12, 28); // December Saturday, strong seasonal adjustment
    let huge = ensemble::post_process(50_000.0, 2000.0, day, day.weekday(), &clamp, &config);
    assert!(huge <= 3000.0);

    let empty_history = ClampLimit {
        mean: 0.0,
        std: 0.0,
        limit: 0.0,
    };
    let floored =
        ensemble::post_process(-500.0, 0.0, day, day.weekday(), &empty_history, &config);
    assert_eq!(floored, 0.0);
}

#[test]
fn test_clamp_limit_formula() {
    // Known values: mean 100, sample std 10
    let values = vec![90.0, 100.0, 110.0, 100.0, 90.0, 110.0];
    let clamp = ClampLimit::derive(&values);

    assert_approx_eq!(clamp.mean, 100.0, 1e-9);
    assert!(clamp.limit >= clamp.mean);
    assert_approx_eq!(clamp.limit, (3.0 * clamp.mean).max(clamp.mean + 3.0 * clamp.std), 1e-9);
}

#[test]
fn test_clamp_limit_filters_invalid_values() {
    let values = vec![0.0, -50.0, f64::NAN, 100.0, 100.0];
    let clamp = ClampLimit::derive(&values);

    assert_approx_eq!(clamp.mean, 100.0, 1e-9);
}

#[test]
fn test_clamp_limit_single_sample_fallback() {
    let clamp = ClampLimit::derive(&[200.0]);

    // Std falls back to 15% of the mean
    assert_approx_eq!(clamp.std, 30.0, 1e-9);
    assert_approx_eq!(clamp.limit, 600.0, 1e-9);
}
