//! Adaptive moving average
//!
//! The averaging window shrinks as historical volatility rises, weights decay
//! exponentially from the most recent observation backwards, and the result
//! is corrected for month, weekday and day-of-month effects.

use crate::factors::time_of_month_impact;
use crate::methods::{PredictionContext, RawPrediction};
use chrono::Datelike;

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.moving_average;
    let values = ctx.series.values();
    if values.is_empty() {
        return RawPrediction::Absolute(ctx.base_revenue);
    }

    let shrink = (config.volatility_window_scale * ctx.stats.cv).round() as usize;
    let window = config
        .max_window
        .saturating_sub(shrink)
        .clamp(config.min_window, config.max_window)
        .min(values.len());

    let recent = &values[values.len() - window..];

    // Most recent value carries weight 1, each step back decays
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (age, value) in recent.iter().rev().enumerate() {
        let weight = config.weight_decay.powi(age as i32);
        weighted_sum += weight * value;
        weight_sum += weight;
    }
    let average = weighted_sum / weight_sum;

    let seasonal = &ctx.config.seasonal;
    let corrected = average
        * seasonal.month_multiplier(ctx.date.month())
        * seasonal.weekday_multiplier(ctx.weekday)
        * (1.0 + time_of_month_impact(ctx.date.day(), &ctx.config.time_of_month));

    RawPrediction::Absolute(corrected)
}
