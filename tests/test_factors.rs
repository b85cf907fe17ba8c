use chrono::{Duration, NaiveDate};
use revenue_forecast::config::{
    EconomicCycleConfig, HolidayImpactConfig, LocalEventConfig, SeasonalConfig, TimeOfMonthConfig,
    WeatherConfig,
};
use revenue_forecast::factors;
use revenue_forecast::stats::HistoryStats;
use revenue_forecast::{RevenueSeries, RussianHolidayCalendar, WeatherSample};
use rstest::rstest;

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

#[test]
fn test_seasonal_multiplier_stays_in_range() {
    let config = SeasonalConfig::default();

    let mut current = date(2024, 1, 1);
    for _ in 0..366 {
        let multiplier = factors::seasonal_multiplier(current, &config);
        assert!((0.5..=2.0).contains(&multiplier), "date {current}");
        current = current.succ_opt().unwrap();
    }
}

#[test]
fn test_seasonal_multiplier_december_weekend_peaks() {
    let config = SeasonalConfig::default();

    // Saturday before New Year vs an ordinary Tuesday in February
    let december_saturday = factors::seasonal_multiplier(date(2024, 12, 28), &config);
    let february_tuesday = factors::seasonal_multiplier(date(2024, 2, 6), &config);

    assert!(december_saturday > february_tuesday);
}

#[rstest]
#[case(date(2024, 1, 1), 0.30)] // New Year's Day, major
#[case(date(2024, 3, 8), 0.30)] // Women's Day, major
#[case(date(2024, 6, 12), 0.20)] // Russia Day, public
#[case(date(2024, 5, 9), 0.12)] // Victory Day, patriotic
#[case(date(2024, 3, 7), 0.15)] // Eve of Women's Day
#[case(date(2024, 4, 17), 0.0)] // Ordinary Wednesday
fn test_holiday_impact(#[case] day: NaiveDate, #[case] expected: f64) {
    let impact =
        factors::holiday_impact(day, &RussianHolidayCalendar, &HolidayImpactConfig::default());

    assert_eq!(impact, expected);
}

#[test]
fn test_weather_impact_severe_conditions_are_negative() {
    let config = WeatherConfig::default();

    let blizzard = WeatherSample {
        temperature: -22.0,
        precipitation: 12.0,
        wind_speed: 18.0,
    };
    let mild = WeatherSample {
        temperature: 20.0,
        precipitation: 0.0,
        wind_speed: 3.0,
    };

    assert!(factors::weather_impact(blizzard, &config) < 0.0);
    assert!(factors::weather_impact(mild, &config) > 0.0);
}

#[test]
fn test_weather_impact_is_clamped() {
    let config = WeatherConfig::default();

    let extreme = WeatherSample {
        temperature: -40.0,
        precipitation: 100.0,
        wind_speed: 40.0,
    };
    let impact = factors::weather_impact(extreme, &config);

    assert!((-0.4..=0.4).contains(&impact));
}

#[rstest]
#[case(1, 0.12)] // Payday
#[case(8, 0.04)]
#[case(15, 0.0)]
#[case(22, 0.06)] // Advance
#[case(28, -0.08)] // Pre-payday squeeze
fn test_time_of_month_impact(#[case] day: u32, #[case] expected: f64) {
    assert_eq!(
        factors::time_of_month_impact(day, &TimeOfMonthConfig::default()),
        expected
    );
}

#[test]
fn test_historical_pattern_impact_reflects_weekday_deviation() {
    // Four weeks starting Monday 2024-01-01; Saturdays doubled
    let values: Vec<f64> = (0..28)
        .map(|i| if i % 7 == 5 { 2000.0 } else { 1000.0 })
        .collect();
    let series = daily_series(date(2024, 1, 1), &values);
    let stats = HistoryStats::compute(&series, 6);

    // 2024-02-03 is a Saturday, 2024-02-06 a Tuesday
    let saturday = factors::historical_pattern_impact(date(2024, 2, 3), &stats);
    let tuesday = factors::historical_pattern_impact(date(2024, 2, 6), &stats);

    assert!(saturday > 0.0);
    assert!(tuesday < 0.0);
    assert!((-0.3..=0.3).contains(&saturday));
}

#[test]
fn test_economic_cycle_impact_bounded_and_quarter_driven() {
    let config = EconomicCycleConfig::default();

    let mut current = date(2024, 1, 1);
    for _ in 0..366 {
        let impact = factors::economic_cycle_impact(current, &config);
        assert!((-0.2..=0.2).contains(&impact));
        current = current.succ_opt().unwrap();
    }

    // Q4 carries the strongest base level
    let q4 = factors::economic_cycle_impact(date(2024, 11, 15), &config);
    let q1 = factors::economic_cycle_impact(date(2024, 2, 15), &config);
    assert!(q4 > q1);
}

#[test]
fn test_local_event_impact() {
    let config = LocalEventConfig::default();

    assert!(factors::local_event_impact(date(2024, 9, 1), &config) > 0.0);
    assert_eq!(factors::local_event_impact(date(2024, 9, 2), &config), 0.0);
}

#[test]
fn test_customer_behavior_impact_follows_momentum() {
    // Last week 50% above the week before
    let mut values = vec![1000.0; 7];
    values.extend(vec![1500.0; 7]);
    let growing = daily_series(date(2024, 1, 1), &values);

    let impact = factors::customer_behavior_impact(&growing);
    assert!(impact > 0.0);
    assert!(impact <= 0.25);

    let flat = daily_series(date(2024, 1, 1), &vec![1000.0; 14]);
    assert_eq!(factors::customer_behavior_impact(&flat), 0.0);
}

#[test]
fn test_customer_behavior_impact_needs_two_weeks() {
    let short = daily_series(date(2024, 1, 1), &vec![1000.0; 10]);
    assert_eq!(factors::customer_behavior_impact(&short), 0.0);
}
