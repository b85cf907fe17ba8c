//! Linear factor regression
//!
//! Base revenue scaled by a fixed-coefficient combination of the impact
//! factors, minus a static L2 penalty over the coefficients. The penalty is
//! not data-dependent; it is a constant regularization bias baked into the
//! formula.

use crate::methods::{weighted_factor_sum, PredictionContext, RawPrediction};

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.linear;

    let factor_sum = weighted_factor_sum(ctx.factors, config);

    let coefficients = [
        config.trend,
        config.weather,
        config.holiday,
        config.time_of_month,
        config.historical_pattern,
        config.economic,
        config.local_event,
        config.customer_behavior,
    ];
    let penalty = config.ridge_lambda * coefficients.iter().map(|c| c * c).sum::<f64>();

    RawPrediction::Multiplier(1.0 + factor_sum - penalty)
}
