//! Seasonal autoregressive heuristic
//!
//! Last value plus an AR term on the most recent difference, a residual
//! moving-average term over recent differences, and a seasonal-lag deviation
//! once enough history exists, scaled by the seasonal multiplier.

use crate::methods::{PredictionContext, RawPrediction};
use crate::stats;

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.seasonal_ar;
    let values = ctx.series.values();
    let n = values.len();

    if n < 3 {
        return RawPrediction::Absolute(ctx.base_revenue);
    }

    let last = values[n - 1];
    let ar_term = config.phi * (values[n - 1] - values[n - 2]);

    let window = (n - 1).min(7);
    let recent_diffs: Vec<f64> = values[n - 1 - window..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .collect();
    let ma_term = config.theta * stats::mean(&recent_diffs);

    let seasonal_term = if n >= config.min_seasonal_periods && n > config.seasonal_lag {
        config.seasonal_gamma * (values[n - 1 - config.seasonal_lag] - ctx.stats.mean)
    } else {
        0.0
    };

    let prediction = (last + ar_term + ma_term + seasonal_term) * ctx.factors.seasonal_multiplier;

    RawPrediction::Absolute(prediction)
}
