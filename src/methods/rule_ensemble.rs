//! Rule-ensemble heuristic
//!
//! A day/month multiplier plus a fixed list of independent threshold rules.
//! Each rule's adjustment is damped by its position in the list, so earlier
//! rules carry more weight.

use crate::config::RuleFactor;
use crate::methods::{PredictionContext, RawPrediction};
use chrono::Datelike;

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let seasonal = &ctx.config.seasonal;
    let factors = ctx.factors;

    let mut multiplier = seasonal.weekday_multiplier(ctx.weekday)
        * seasonal.month_multiplier(ctx.date.month());

    for (position, rule) in ctx.config.rules.rules.iter().enumerate() {
        let observed = match rule.factor {
            RuleFactor::Weather => factors.weather_impact,
            RuleFactor::Holiday => factors.holiday_impact,
            RuleFactor::Economic => factors.economic_cycle_impact,
            RuleFactor::HistoricalPattern => factors.historical_pattern_impact,
        };

        if observed > rule.threshold {
            multiplier += rule.adjustment / (position + 1) as f64;
        }
    }

    RawPrediction::Multiplier(multiplier)
}
