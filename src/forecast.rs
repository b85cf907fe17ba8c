//! Forecast orchestration
//!
//! Drives the day-by-day horizon loop: factors, prediction methods, ensemble
//! combination, confidence, and the weekly/monthly rollups over the emitted
//! records.

use crate::calendar::{HolidayProvider, RussianHolidayCalendar};
use crate::calibration::ClampLimit;
use crate::confidence;
use crate::config::EngineConfig;
use crate::data::RevenueSeries;
use crate::ensemble::{self, EnsemblePath};
use crate::error::{ForecastError, Result};
use crate::factors::{compute_factors, FactorBundle};
use crate::methods::{self, MethodId, MethodPrediction};
use crate::stats::HistoryStats;
use crate::weather::{SimulatedWeather, WeatherProvider};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Minimum usable history before any forecast is produced
pub const MIN_HISTORY_DAYS: usize = 14;

/// Supported forecast horizons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Horizon {
    /// 7 days
    Week,
    /// 90 days
    Quarter,
}

impl Horizon {
    /// Number of days covered
    pub fn days(&self) -> usize {
        match self {
            Horizon::Week => 7,
            Horizon::Quarter => 90,
        }
    }
}

/// Direction of a forecast day relative to the trailing mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Up,
    Down,
    Stable,
}

/// One forecast day, immutable once emitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub predicted_revenue: f64,
    pub confidence: f64,
    pub trend: TrendLabel,
    pub factors: FactorBundle,
}

/// Rollup over 7 contiguous forecast days, aligned to the horizon start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub predicted_revenue: f64,
    pub average_confidence: f64,
}

/// Rollup over the forecast days of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub predicted_revenue: f64,
    pub average_confidence: f64,
}

/// Which impact categories the engine modeled for this forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeledFactors {
    pub seasonality: bool,
    pub holidays: bool,
    pub weather: bool,
    pub time_of_month: bool,
    pub economics: bool,
    pub local_events: bool,
    pub customer_behavior: bool,
}

/// Descriptor of how a forecast was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Methodology {
    pub algorithm: String,
    pub data_points: usize,
    pub modeled: ModeledFactors,
}

/// A complete forecast over one horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueForecast {
    pub records: Vec<ForecastRecord>,
    pub weekly: Vec<WeeklyBucket>,
    pub monthly: Vec<MonthlyBucket>,
    pub methodology: Methodology,
}

impl RevenueForecast {
    /// Serialize the forecast for the dashboard response
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ForecastError::ForecastingError(format!("Failed to serialize forecast: {e}"))
        })
    }
}

/// Outcome of one forecast call
///
/// Too little history is not an error: the caller substitutes its own simpler
/// heuristic when no forecast is produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForecastOutcome {
    Forecast(RevenueForecast),
    InsufficientHistory { observed: usize },
}

/// The forecasting engine
///
/// Holds the calibration and the holiday/weather collaborators. A fixed seed
/// makes the weather simulation and bootstrap resampling reproducible.
pub struct ForecastEngine {
    config: EngineConfig,
    holidays: Box<dyn HolidayProvider>,
    weather: Box<dyn WeatherProvider>,
    seed: Option<u64>,
    debug: bool,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ForecastEngine {
    pub fn new(config: EngineConfig) -> Self {
        let weather = SimulatedWeather::new(config.weather.clone());
        Self {
            config,
            holidays: Box::new(RussianHolidayCalendar),
            weather: Box::new(weather),
            seed: None,
            debug: false,
        }
    }

    /// Seed the pseudo-random source for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the built-in holiday calendar
    pub fn with_holiday_provider(mut self, provider: impl HolidayProvider + 'static) -> Self {
        self.holidays = Box::new(provider);
        self
    }

    /// Replace the simulated weather source
    pub fn with_weather_provider(mut self, provider: impl WeatherProvider + 'static) -> Self {
        self.weather = Box::new(provider);
        self
    }

    /// Emit per-day, per-method debug log lines
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Forecast daily revenue over the horizon following the last observation
    pub fn forecast(&self, series: &RevenueSeries, horizon: Horizon) -> Result<ForecastOutcome> {
        if series.len() < MIN_HISTORY_DAYS {
            return Ok(ForecastOutcome::InsufficientHistory {
                observed: series.len(),
            });
        }

        let last_date = series.last_date().ok_or_else(|| {
            ForecastError::DataError("Series has no observations".to_string())
        })?;

        let stats = HistoryStats::compute(series, self.config.confidence.coverage_months);
        let clamp = ClampLimit::derive(&series.values());
        let path = ensemble::select_path(stats.monthly_totals.len());
        let weights = ensemble::score_methods(path, &stats, &self.config);

        let active_methods: &[MethodId] = match path {
            EnsemblePath::Standard => &MethodId::STANDARD,
            EnsemblePath::Sparse => &MethodId::SPARSE,
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut records = Vec::with_capacity(horizon.days());
        for day_index in 0..horizon.days() {
            let date = last_date + Duration::days(day_index as i64 + 1);
            let weekday = date.weekday();
            let base_revenue = series.base_day_revenue(weekday);

            let weather_sample = self.weather.conditions(date, &mut rng);
            let factors = compute_factors(
                date,
                &self.config,
                series,
                &stats,
                self.holidays.as_ref(),
                weather_sample,
            );

            let ctx = methods::PredictionContext {
                base_revenue,
                factors: &factors,
                series,
                stats: &stats,
                config: &self.config,
                date,
                weekday,
            };

            let predictions: Vec<MethodPrediction> = active_methods
                .iter()
                .map(|method| {
                    let raw = methods::run(*method, &ctx, &mut rng);
                    let value = methods::sanitize(raw, base_revenue);
                    if self.debug {
                        tracing::debug!(
                            date = %date,
                            method = method.name(),
                            weight = weights.get(*method),
                            raw = ?raw,
                            contribution = weights.get(*method) * value,
                            "method prediction"
                        );
                    }
                    MethodPrediction {
                        method: *method,
                        value,
                    }
                })
                .collect();

            let combined = ensemble::combine(&predictions, &weights);
            let predicted_revenue =
                ensemble::post_process(combined, base_revenue, date, weekday, &clamp, &self.config);

            let confidence = confidence::estimate(
                path,
                &stats,
                weekday,
                day_index,
                &self.config.confidence,
            );

            let record = ForecastRecord {
                date,
                predicted_revenue,
                confidence,
                trend: trend_label(predicted_revenue, stats.mean),
                factors,
            };
            if self.debug {
                tracing::debug!(
                    date = %date,
                    predicted = record.predicted_revenue,
                    confidence = record.confidence,
                    "forecast day"
                );
            }
            records.push(record);
        }

        let methodology = Methodology {
            algorithm: algorithm_name(horizon, path),
            data_points: series.len(),
            modeled: ModeledFactors {
                seasonality: true,
                holidays: true,
                weather: true,
                time_of_month: true,
                economics: true,
                local_events: true,
                customer_behavior: true,
            },
        };

        Ok(ForecastOutcome::Forecast(RevenueForecast {
            weekly: weekly_buckets(&records),
            monthly: monthly_buckets(&records),
            records,
            methodology,
        }))
    }
}

fn algorithm_name(horizon: Horizon, path: EnsemblePath) -> String {
    let variant = match horizon {
        Horizon::Week => "weekly",
        Horizon::Quarter => "extended",
    };
    match path {
        EnsemblePath::Standard => format!("adaptive-ensemble-{variant}"),
        EnsemblePath::Sparse => format!("sparse-ensemble-{variant}"),
    }
}

fn trend_label(predicted: f64, trailing_mean: f64) -> TrendLabel {
    if trailing_mean <= 0.0 {
        return TrendLabel::Stable;
    }
    let ratio = predicted / trailing_mean;
    if ratio > 1.05 {
        TrendLabel::Up
    } else if ratio < 0.95 {
        TrendLabel::Down
    } else {
        TrendLabel::Stable
    }
}

/// 7-day buckets aligned to the horizon start (final partial week included)
fn weekly_buckets(records: &[ForecastRecord]) -> Vec<WeeklyBucket> {
    records
        .chunks(7)
        .map(|chunk| WeeklyBucket {
            start_date: chunk[0].date,
            end_date: chunk[chunk.len() - 1].date,
            predicted_revenue: chunk.iter().map(|r| r.predicted_revenue).sum(),
            average_confidence: chunk.iter().map(|r| r.confidence).sum::<f64>()
                / chunk.len() as f64,
        })
        .collect()
}

/// Calendar-month buckets over the forecast days
fn monthly_buckets(records: &[ForecastRecord]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<(i32, u32, f64, f64, usize)> = Vec::new();

    for record in records {
        let key = (record.date.year(), record.date.month());
        match buckets.last_mut() {
            Some((year, month, revenue, conf, count)) if (*year, *month) == key => {
                *revenue += record.predicted_revenue;
                *conf += record.confidence;
                *count += 1;
            }
            _ => buckets.push((key.0, key.1, record.predicted_revenue, record.confidence, 1)),
        }
    }

    buckets
        .into_iter()
        .map(|(year, month, revenue, conf, count)| MonthlyBucket {
            year,
            month,
            predicted_revenue: revenue,
            average_confidence: conf / count as f64,
        })
        .collect()
}
