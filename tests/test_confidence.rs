use chrono::{Duration, NaiveDate, Weekday};
use revenue_forecast::confidence;
use revenue_forecast::config::ConfidenceConfig;
use revenue_forecast::ensemble::EnsemblePath;
use revenue_forecast::stats::HistoryStats;
use revenue_forecast::RevenueSeries;

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

fn stable_stats() -> HistoryStats {
    let series = daily_series(date(2024, 1, 1), &[1000.0; 90]);
    HistoryStats::compute(&series, 6)
}

fn noisy_stats() -> HistoryStats {
    // Wild month-to-month swings on top of a choppy daily pattern
    let values: Vec<f64> = (0..90)
        .map(|i| {
            let monthly_level = if (i / 30) % 2 == 0 { 500.0 } else { 3500.0 };
            monthly_level + if i % 2 == 0 { -300.0 } else { 300.0 }
        })
        .collect();
    let series = daily_series(date(2024, 1, 1), &values);
    HistoryStats::compute(&series, 6)
}

#[test]
fn test_standard_path_stays_in_range() {
    let config = ConfidenceConfig::default();

    for stats in [stable_stats(), noisy_stats()] {
        for weekday in [Weekday::Mon, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
            for day in [0, 6, 7, 45, 89] {
                let c =
                    confidence::estimate(EnsemblePath::Standard, &stats, weekday, day, &config);
                assert!((0.6..=0.98).contains(&c), "confidence {c} out of range");
            }
        }
    }
}

#[test]
fn test_sparse_path_stays_in_range() {
    let config = ConfidenceConfig::default();
    let series = daily_series(date(2024, 1, 1), &[1000.0; 14]);
    let stats = HistoryStats::compute(&series, 6);

    for weekday in [Weekday::Mon, Weekday::Sat] {
        for day in [0, 6, 89] {
            let c = confidence::estimate(EnsemblePath::Sparse, &stats, weekday, day, &config);
            assert!((0.1..=0.95).contains(&c), "confidence {c} out of range");
        }
    }
}

#[test]
fn test_stable_month_nears_the_sparse_bound() {
    let config = ConfidenceConfig::default();
    // One calendar month of identical days: every sub-confidence saturates
    // except monthly coverage
    let series = daily_series(date(2024, 1, 1), &[1000.0; 30]);
    let stats = HistoryStats::compute(&series, 6);

    let midweek = confidence::estimate(EnsemblePath::Sparse, &stats, Weekday::Wed, 0, &config);
    assert!(midweek > 0.92, "midweek confidence only reached {midweek}");
    assert!(midweek <= 0.95);

    // Weekends stay dented but still high on perfectly stable data
    let saturday = confidence::estimate(EnsemblePath::Sparse, &stats, Weekday::Sat, 0, &config);
    assert!(saturday > 0.8);
    assert!(saturday < midweek);
}

#[test]
fn test_stable_history_beats_noisy_history() {
    let config = ConfidenceConfig::default();

    let stable =
        confidence::estimate(EnsemblePath::Standard, &stable_stats(), Weekday::Wed, 0, &config);
    let noisy =
        confidence::estimate(EnsemblePath::Standard, &noisy_stats(), Weekday::Wed, 0, &config);

    assert!(stable > noisy);
}

#[test]
fn test_weekends_are_less_confident() {
    let config = ConfidenceConfig::default();
    let stats = stable_stats();

    let wednesday =
        confidence::estimate(EnsemblePath::Standard, &stats, Weekday::Wed, 0, &config);
    let saturday =
        confidence::estimate(EnsemblePath::Standard, &stats, Weekday::Sat, 0, &config);

    assert!(saturday < wednesday);
}

#[test]
fn test_confidence_decays_beyond_first_week() {
    let config = ConfidenceConfig::default();
    let stats = stable_stats();

    let near = confidence::estimate(EnsemblePath::Standard, &stats, Weekday::Wed, 3, &config);
    let far = confidence::estimate(EnsemblePath::Standard, &stats, Weekday::Wed, 60, &config);

    assert!(far < near);
    assert!(far >= 0.6);
}

#[test]
fn test_decay_respects_standard_floor() {
    let config = ConfidenceConfig::default();
    let stats = stable_stats();

    // Even far beyond the horizon the standard path never drops below 0.6
    let c = confidence::estimate(EnsemblePath::Standard, &stats, Weekday::Sun, 89, &config);
    assert!(c >= 0.6);
}
