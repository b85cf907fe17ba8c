//! The independent prediction methods feeding the ensemble
//!
//! All methods share one context and return a [`RawPrediction`] stating
//! explicitly whether the value scales the base day revenue or is already a
//! currency amount, so the ensemble never has to guess from magnitude.

use crate::config::{EngineConfig, LinearMethodConfig};
use crate::data::RevenueSeries;
use crate::factors::FactorBundle;
use crate::stats::HistoryStats;
use chrono::{NaiveDate, Weekday};
use rand::RngCore;
use serde::{Deserialize, Serialize};

pub mod exponential;
pub mod kernel;
pub mod linear;
pub mod moving_average;
pub mod nonlinear;
pub mod rule_ensemble;
pub mod seasonal_ar;
pub mod sparse;

/// Identifier of one prediction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodId {
    Linear,
    Exponential,
    MovingAverage,
    Nonlinear,
    SeasonalAr,
    RuleEnsemble,
    Kernel,
    Bayesian,
    Bootstrap,
    Quantile,
}

impl MethodId {
    /// Methods of the standard ensemble path
    pub const STANDARD: [MethodId; 7] = [
        MethodId::Linear,
        MethodId::Exponential,
        MethodId::MovingAverage,
        MethodId::Nonlinear,
        MethodId::SeasonalAr,
        MethodId::RuleEnsemble,
        MethodId::Kernel,
    ];

    /// Methods of the sparse-data fallback path
    pub const SPARSE: [MethodId; 3] = [MethodId::Bayesian, MethodId::Bootstrap, MethodId::Quantile];

    /// Stable name used in debug log lines
    pub fn name(&self) -> &'static str {
        match self {
            MethodId::Linear => "linear",
            MethodId::Exponential => "exponential",
            MethodId::MovingAverage => "movingAverage",
            MethodId::Nonlinear => "nonlinear",
            MethodId::SeasonalAr => "seasonalAR",
            MethodId::RuleEnsemble => "treeEnsemble",
            MethodId::Kernel => "kernelSimilarity",
            MethodId::Bayesian => "bayesian",
            MethodId::Bootstrap => "bootstrap",
            MethodId::Quantile => "quantile",
        }
    }
}

/// Raw output of one method before ensembling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPrediction {
    /// A multiplier of the base day revenue
    Multiplier(f64),
    /// An already-absolute currency value
    Absolute(f64),
}

impl RawPrediction {
    /// Resolve to a currency value against the base day revenue
    pub fn resolve(&self, base_revenue: f64) -> f64 {
        match self {
            RawPrediction::Multiplier(m) => base_revenue * m,
            RawPrediction::Absolute(v) => *v,
        }
    }
}

/// Everything a prediction method may consume for one forecast day
#[derive(Debug, Clone, Copy)]
pub struct PredictionContext<'a> {
    /// Historical average for this weekday (overall mean fallback)
    pub base_revenue: f64,
    pub factors: &'a FactorBundle,
    pub series: &'a RevenueSeries,
    pub stats: &'a HistoryStats,
    pub config: &'a EngineConfig,
    pub date: NaiveDate,
    pub weekday: Weekday,
}

/// One method's resolved, sanitized currency prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodPrediction {
    pub method: MethodId,
    pub value: f64,
}

/// Run one method; `rng` is consumed only by the bootstrap method
pub fn run(method: MethodId, ctx: &PredictionContext, rng: &mut dyn RngCore) -> RawPrediction {
    match method {
        MethodId::Linear => linear::predict(ctx),
        MethodId::Exponential => exponential::predict(ctx),
        MethodId::MovingAverage => moving_average::predict(ctx),
        MethodId::Nonlinear => nonlinear::predict(ctx),
        MethodId::SeasonalAr => seasonal_ar::predict(ctx),
        MethodId::RuleEnsemble => rule_ensemble::predict(ctx),
        MethodId::Kernel => kernel::predict(ctx),
        MethodId::Bayesian => sparse::bayesian(ctx),
        MethodId::Bootstrap => sparse::bootstrap(ctx, rng),
        MethodId::Quantile => sparse::quantile(ctx),
    }
}

/// Resolve and sanitize a raw prediction
///
/// Non-finite or negative outputs fall back to the base day revenue so a
/// single degenerate method can never poison the ensemble.
pub fn sanitize(raw: RawPrediction, base_revenue: f64) -> f64 {
    let resolved = raw.resolve(base_revenue);
    if resolved.is_finite() && resolved >= 0.0 {
        resolved
    } else {
        base_revenue.max(0.0)
    }
}

/// Fixed-coefficient weighted sum over the additive impact factors
pub fn weighted_factor_sum(factors: &FactorBundle, config: &LinearMethodConfig) -> f64 {
    config.trend * factors.trend
        + config.weather * factors.weather_impact
        + config.holiday * factors.holiday_impact
        + config.time_of_month * factors.time_of_month_impact
        + config.historical_pattern * factors.historical_pattern_impact
        + config.economic * factors.economic_cycle_impact
        + config.local_event * factors.local_event_impact
        + config.customer_behavior * factors.customer_behavior_impact
}
