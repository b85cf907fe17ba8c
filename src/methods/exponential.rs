//! Triple exponential smoothing
//!
//! Replays the entire history with fixed smoothing constants to rebuild
//! level, trend and a weekly multiplicative seasonal state, then forecasts
//! one step ahead scaled by the damped factor sum.

use crate::methods::{weighted_factor_sum, PredictionContext, RawPrediction};
use crate::stats;

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.smoothing;
    let values = ctx.series.values();
    let season = config.season_length;

    let factor_scale =
        1.0 + config.factor_damping * weighted_factor_sum(ctx.factors, &ctx.config.linear);

    // Not enough data for a seasonal state: plain level/trend smoothing
    if values.len() < 2 * season {
        let forecast = smooth_level_trend(&values, config.alpha, config.beta);
        return RawPrediction::Absolute(forecast * factor_scale);
    }

    let first_season_mean = stats::mean(&values[..season]).max(f64::MIN_POSITIVE);
    let second_season_mean = stats::mean(&values[season..2 * season]);

    let mut level = first_season_mean;
    let mut trend = (second_season_mean - first_season_mean) / season as f64;
    let mut seasonal: Vec<f64> = values[..season]
        .iter()
        .map(|v| (v / first_season_mean).max(0.05))
        .collect();

    for (t, &value) in values.iter().enumerate().skip(season) {
        let season_idx = t % season;
        let prev_level = level;

        level = config.alpha * (value / seasonal[season_idx])
            + (1.0 - config.alpha) * (level + trend);
        trend = config.beta * (level - prev_level) + (1.0 - config.beta) * trend;
        if level > 0.0 {
            seasonal[season_idx] =
                config.gamma * (value / level) + (1.0 - config.gamma) * seasonal[season_idx];
        }
    }

    let next_season_idx = values.len() % season;
    let forecast = (level + trend) * seasonal[next_season_idx];

    RawPrediction::Absolute(forecast * factor_scale)
}

fn smooth_level_trend(values: &[f64], alpha: f64, beta: f64) -> f64 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let mut level = values[0];
            let mut trend = values[1] - values[0];
            for &value in &values[1..] {
                let prev_level = level;
                level = alpha * value + (1.0 - alpha) * (level + trend);
                trend = beta * (level - prev_level) + (1.0 - beta) * trend;
            }
            level + trend
        }
    }
}
