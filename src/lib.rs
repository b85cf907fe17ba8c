//! # Revenue Forecast
//!
//! Heuristic daily revenue forecasting engine for a small-business analytics
//! dashboard.
//!
//! ## Features
//!
//! - Per-day impact factors (seasonality, holidays, weather, payday cycle,
//!   economic cycle, local events, customer behavior)
//! - Ten independent prediction methods combined through an adaptive ensemble
//! - Historically derived clamp limits and post-processing
//! - Calibrated per-day confidence scores
//! - Sparse-data fallback ensemble (Bayesian shrinkage, bootstrap, quantile)
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use revenue_forecast::{
//!     EngineConfig, ForecastEngine, ForecastOutcome, Horizon, RevenueSeries,
//! };
//!
//! # fn main() -> revenue_forecast::Result<()> {
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let history: Vec<(NaiveDate, f64)> = (0..30)
//!     .map(|i| (start + chrono::Duration::days(i), 1000.0 + 20.0 * i as f64))
//!     .collect();
//! let series = RevenueSeries::from_pairs(history)?;
//!
//! let engine = ForecastEngine::new(EngineConfig::default()).with_seed(42);
//! match engine.forecast(&series, Horizon::Week)? {
//!     ForecastOutcome::Forecast(forecast) => {
//!         assert_eq!(forecast.records.len(), 7);
//!     }
//!     ForecastOutcome::InsufficientHistory { .. } => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod calibration;
pub mod confidence;
pub mod config;
pub mod data;
pub mod ensemble;
pub mod error;
pub mod factors;
pub mod forecast;
pub mod methods;
pub mod stats;
pub mod weather;

// Re-export commonly used types
pub use crate::calendar::{Holiday, HolidayKind, HolidayProvider, RussianHolidayCalendar};
pub use crate::calibration::ClampLimit;
pub use crate::config::EngineConfig;
pub use crate::data::{RevenueObservation, RevenueSeries};
pub use crate::ensemble::{EnsemblePath, EnsembleWeights};
pub use crate::error::{ForecastError, Result};
pub use crate::factors::FactorBundle;
pub use crate::forecast::{
    ForecastEngine, ForecastOutcome, ForecastRecord, Horizon, Methodology, MonthlyBucket,
    RevenueForecast, TrendLabel, WeeklyBucket, MIN_HISTORY_DAYS,
};
pub use crate::methods::{MethodId, MethodPrediction, RawPrediction};
pub use crate::weather::{SimulatedWeather, WeatherProvider, WeatherSample};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
