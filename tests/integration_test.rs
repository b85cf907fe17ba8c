//! Full workflow over a realistic history: trend, weekday seasonality and a
//! deterministic noise term, forecast over the extended horizon.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use revenue_forecast::{
    ClampLimit, EngineConfig, ForecastEngine, ForecastOutcome, Horizon, RevenueForecast,
    RevenueSeries,
};

/// 120 days of synthetic shop revenue starting 2024-01-01: a slow upward
/// trend, busy weekends and a mid-week dip.
fn shop_history() -> RevenueSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let pairs: Vec<(NaiveDate, f64)> = (0..120)
        .map(|i| {
            let date = start + Duration::days(i);
            let weekday_boost = match date.weekday() {
                Weekday::Fri => 250.0,
                Weekday::Sat => 450.0,
                Weekday::Sun => 150.0,
                Weekday::Wed => -100.0,
                _ => 0.0,
            };
            let wobble = 60.0 * ((i as f64) * 0.7).sin();
            (date, 900.0 + 2.5 * i as f64 + weekday_boost + wobble)
        })
        .collect();
    RevenueSeries::from_pairs(pairs).unwrap()
}

fn quarter_forecast() -> RevenueForecast {
    let engine = ForecastEngine::new(EngineConfig::default()).with_seed(2024);
    match engine.forecast(&shop_history(), Horizon::Quarter).unwrap() {
        ForecastOutcome::Forecast(forecast) => forecast,
        ForecastOutcome::InsufficientHistory { observed } => {
            panic!("120 observations should suffice, got insufficient ({observed})")
        }
    }
}

#[test]
fn test_full_quarter_workflow() {
    let forecast = quarter_forecast();
    let limit = ClampLimit::derive(&shop_history().values()).limit;

    assert_eq!(forecast.records.len(), 90);
    assert_eq!(forecast.methodology.data_points, 120);
    assert_eq!(forecast.methodology.algorithm, "adaptive-ensemble-extended");

    for record in &forecast.records {
        assert!(
            record.predicted_revenue >= 0.0 && record.predicted_revenue <= limit,
            "{}: {} outside [0, {limit}]",
            record.date,
            record.predicted_revenue
        );
        assert!(
            (0.1..=0.98).contains(&record.confidence),
            "{}: confidence {}",
            record.date,
            record.confidence
        );
        assert!(record.predicted_revenue.is_finite());
    }
}

#[test]
fn test_weekend_pattern_survives_into_the_forecast() {
    let forecast = quarter_forecast();

    let mean_for = |weekday: Weekday| {
        let days: Vec<f64> = forecast
            .records
            .iter()
            .filter(|r| r.date.weekday() == weekday)
            .map(|r| r.predicted_revenue)
            .collect();
        days.iter().sum::<f64>() / days.len() as f64
    };

    assert!(mean_for(Weekday::Sat) > mean_for(Weekday::Wed));
}

#[test]
fn test_rollups_partition_the_horizon() {
    let forecast = quarter_forecast();

    let weekly_days: usize = forecast
        .weekly
        .iter()
        .map(|b| (b.end_date - b.start_date).num_days() as usize + 1)
        .sum();
    assert_eq!(weekly_days, 90);

    let monthly_total: f64 = forecast.monthly.iter().map(|b| b.predicted_revenue).sum();
    let record_total: f64 = forecast.records.iter().map(|r| r.predicted_revenue).sum();
    assert!((monthly_total - record_total).abs() < 1e-6);

    for bucket in &forecast.monthly {
        assert!((0.1..=0.98).contains(&bucket.average_confidence));
    }
}

#[test]
fn test_forecast_round_trips_through_json() {
    let forecast = quarter_forecast();

    let json = forecast.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["records"].as_array().unwrap().len(), 90);
    assert_eq!(value["methodology"]["data_points"], 120);
    assert!(value["records"][0]["predicted_revenue"].as_f64().is_some());
    assert!(value["records"][0]["factors"]["holiday_impact"].is_number());
}
