//! Per-day impact factor calculators
//!
//! Each calculator maps a calendar date (plus trailing history where noted)
//! to a dimensionless scalar, clamped to its documented band so no single
//! factor can dominate downstream predictions.

use crate::calendar::{HolidayKind, HolidayProvider};
use crate::config::{
    EconomicCycleConfig, EngineConfig, HolidayImpactConfig, LocalEventConfig, SeasonalConfig,
    TimeOfMonthConfig, WeatherConfig,
};
use crate::data::RevenueSeries;
use crate::stats::HistoryStats;
use crate::weather::WeatherSample;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// All impact factors for one forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBundle {
    /// Combined month × weekday multiplier, in [0.5, 2.0]
    pub seasonal_multiplier: f64,
    /// Normalized weekly trend of the trailing history
    pub trend: f64,
    pub weather_impact: f64,
    pub holiday_impact: f64,
    pub time_of_month_impact: f64,
    pub historical_pattern_impact: f64,
    pub economic_cycle_impact: f64,
    pub local_event_impact: f64,
    pub customer_behavior_impact: f64,
}

impl FactorBundle {
    /// Factor profile used by the kernel-similarity method: weather, holiday,
    /// time-of-month, historical pattern, economic, customer behavior
    pub fn profile(&self) -> [f64; 6] {
        [
            self.weather_impact,
            self.holiday_impact,
            self.time_of_month_impact,
            self.historical_pattern_impact,
            self.economic_cycle_impact,
            self.customer_behavior_impact,
        ]
    }
}

/// Compute the full factor bundle for one forecast day
pub fn compute_factors(
    date: NaiveDate,
    config: &EngineConfig,
    series: &RevenueSeries,
    stats: &HistoryStats,
    holidays: &dyn HolidayProvider,
    weather: WeatherSample,
) -> FactorBundle {
    FactorBundle {
        seasonal_multiplier: seasonal_multiplier(date, &config.seasonal),
        trend: stats.trend,
        weather_impact: weather_impact(weather, &config.weather),
        holiday_impact: holiday_impact(date, holidays, &config.holidays),
        time_of_month_impact: time_of_month_impact(date.day(), &config.time_of_month),
        historical_pattern_impact: historical_pattern_impact(date, stats),
        economic_cycle_impact: economic_cycle_impact(date, &config.economic),
        local_event_impact: local_event_impact(date, &config.local_events),
        customer_behavior_impact: customer_behavior_impact(series),
    }
}

/// Combined month × weekday seasonal multiplier
pub fn seasonal_multiplier(date: NaiveDate, config: &SeasonalConfig) -> f64 {
    let combined =
        config.month_multiplier(date.month()) * config.weekday_multiplier(date.weekday());
    combined.clamp(config.multiplier_range.0, config.multiplier_range.1)
}

/// Impact of a holiday (or the eve of a major one) falling on `date`
pub fn holiday_impact(
    date: NaiveDate,
    holidays: &dyn HolidayProvider,
    config: &HolidayImpactConfig,
) -> f64 {
    let impact = match holidays.holiday(date) {
        Some(holiday) => match holiday.kind {
            HolidayKind::Major => config.major,
            HolidayKind::Public => config.public,
            HolidayKind::Patriotic => config.patriotic,
        },
        None if holidays.precedes_major_holiday(date) => config.pre_holiday,
        None => 0.0,
    };
    impact.clamp(config.impact_range.0, config.impact_range.1)
}

/// Impact of one day's weather conditions on foot traffic
pub fn weather_impact(sample: WeatherSample, config: &WeatherConfig) -> f64 {
    let mut impact = 0.0;

    if sample.precipitation >= config.heavy_precipitation_mm {
        impact += config.heavy_precipitation_impact;
    }
    if sample.temperature <= config.severe_cold_below {
        impact += config.severe_cold_impact;
    } else if sample.temperature >= config.severe_heat_above {
        impact += config.severe_heat_impact;
    } else if sample.temperature >= config.comfortable_range.0
        && sample.temperature <= config.comfortable_range.1
    {
        impact += config.comfortable_impact;
    }
    if sample.wind_speed >= config.strong_wind_above {
        impact += config.strong_wind_impact;
    }

    impact.clamp(config.impact_range.0, config.impact_range.1)
}

/// Payday-cycle impact for a day of month
pub fn time_of_month_impact(day: u32, config: &TimeOfMonthConfig) -> f64 {
    config
        .bands
        .iter()
        .find(|(start, end, _)| day >= *start && day <= *end)
        .map(|(_, _, impact)| *impact)
        .unwrap_or(0.0)
}

/// How this weekday historically deviates from the overall mean
pub fn historical_pattern_impact(date: NaiveDate, stats: &HistoryStats) -> f64 {
    if stats.mean <= 0.0 || stats.weekday_count(date.weekday()) == 0 {
        return 0.0;
    }
    (stats.weekday_mean(date.weekday()) / stats.mean - 1.0).clamp(-0.3, 0.3)
}

/// Quarterly base level plus a low-amplitude annual cycle
pub fn economic_cycle_impact(date: NaiveDate, config: &EconomicCycleConfig) -> f64 {
    let quarter = (date.month() as usize - 1) / 3;
    let annual_phase = date.ordinal() as f64 / 365.0;
    let impact = config.quarter_base[quarter] + config.annual_amplitude * (TAU * annual_phase).sin();
    impact.clamp(config.impact_range.0, config.impact_range.1)
}

/// Impact of a recurring local event falling on `date`
pub fn local_event_impact(date: NaiveDate, config: &LocalEventConfig) -> f64 {
    config
        .events
        .iter()
        .find(|event| event.month == date.month() && event.day == date.day())
        .map(|event| event.impact)
        .unwrap_or(0.0)
}

/// Week-over-week revenue momentum, damped and clamped
pub fn customer_behavior_impact(series: &RevenueSeries) -> f64 {
    if series.len() < 14 {
        return 0.0;
    }

    let values = series.values();
    let recent: f64 = values[values.len() - 7..].iter().sum::<f64>() / 7.0;
    let prior: f64 = values[values.len() - 14..values.len() - 7].iter().sum::<f64>() / 7.0;

    if prior <= 0.0 {
        return 0.0;
    }
    (0.5 * (recent - prior) / prior).clamp(-0.25, 0.25)
}
