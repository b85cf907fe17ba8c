//! Nonlinear factor combiner
//!
//! Thirteen normalized inputs pass through two fixed-weight layers with
//! saturating tanh activation. The weights are calibration constants, not
//! trained parameters; the transform is fully deterministic.

use crate::methods::{PredictionContext, RawPrediction};
use chrono::Datelike;

/// Hidden layer weights, one row per hidden unit
pub const HIDDEN_WEIGHTS: [[f64; 13]; 4] = [
    [
        0.9, 0.4, 0.5, 0.8, 0.3, 0.6, 0.2, 0.3, 0.4, 0.5, -0.2, 0.1, 0.2,
    ],
    [
        -0.3, 0.7, -0.4, 0.5, 0.2, 0.4, 0.3, 0.2, 0.5, -0.3, 0.4, -0.1, 0.3,
    ],
    [
        0.5, -0.2, 0.6, 0.3, 0.4, -0.3, 0.1, 0.4, -0.2, 0.6, 0.2, 0.3, -0.4,
    ],
    [
        0.2, 0.5, 0.3, -0.6, 0.1, 0.2, 0.4, -0.3, 0.3, 0.2, -0.5, 0.4, 0.1,
    ],
];

/// Hidden layer biases
pub const HIDDEN_BIASES: [f64; 4] = [-0.4, 0.1, -0.2, 0.0];

/// Output layer weights
pub const OUTPUT_WEIGHTS: [f64; 4] = [0.7, 0.5, -0.4, 0.3];

/// Output layer bias
pub const OUTPUT_BIAS: f64 = 0.05;

/// Half-width of the multiplier band around 1.0
pub const OUTPUT_SPAN: f64 = 0.4;

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let inputs = normalized_inputs(ctx);

    let mut hidden = [0.0; 4];
    for (unit, (weights, bias)) in HIDDEN_WEIGHTS.iter().zip(HIDDEN_BIASES).enumerate() {
        let sum: f64 = weights.iter().zip(inputs).map(|(w, x)| w * x).sum();
        hidden[unit] = (sum + bias).tanh();
    }

    let output: f64 = OUTPUT_WEIGHTS
        .iter()
        .zip(hidden)
        .map(|(w, h)| w * h)
        .sum::<f64>()
        + OUTPUT_BIAS;

    RawPrediction::Multiplier(1.0 + OUTPUT_SPAN * output.tanh())
}

fn normalized_inputs(ctx: &PredictionContext) -> [f64; 13] {
    let f = ctx.factors;

    let base_scale = (2.0 * ctx.stats.mean).max(ctx.base_revenue).max(1.0);

    [
        min_max(f.seasonal_multiplier, 0.5, 2.0),
        min_max(f.trend, -0.4, 0.4),
        min_max(f.weather_impact, -0.4, 0.4),
        min_max(f.holiday_impact, -0.4, 0.4),
        min_max(f.time_of_month_impact, -0.4, 0.4),
        min_max(f.historical_pattern_impact, -0.4, 0.4),
        min_max(f.economic_cycle_impact, -0.4, 0.4),
        min_max(f.local_event_impact, -0.4, 0.4),
        min_max(f.customer_behavior_impact, -0.4, 0.4),
        min_max(ctx.base_revenue, 0.0, base_scale),
        ctx.weekday.num_days_from_monday() as f64 / 6.0,
        (ctx.date.day() - 1) as f64 / 30.0,
        (ctx.date.month() - 1) as f64 / 11.0,
    ]
}

fn min_max(value: f64, low: f64, high: f64) -> f64 {
    ((value - low) / (high - low)).clamp(0.0, 1.0)
}
