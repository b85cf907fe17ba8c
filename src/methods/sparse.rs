//! Sparse-data prediction methods
//!
//! The fallback trio used when monthly history is too thin for the standard
//! ensemble: Bayesian shrinkage toward a seasonal prior, bootstrap
//! resampling, and a quantile (median) estimate robust to outliers.

use crate::methods::{PredictionContext, RawPrediction};
use crate::stats;
use rand::{Rng, RngCore};

/// Precision-weighted combination of a seasonal prior and the sample mean
///
/// The prior is base revenue scaled by the seasonal multiplier with a fixed
/// relative variance; with more (and tighter) data the sample mean dominates.
pub fn bayesian(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.sparse;
    let values = ctx.series.values();

    let prior_mean = ctx.base_revenue * ctx.factors.seasonal_multiplier;
    if values.is_empty() {
        return RawPrediction::Absolute(prior_mean);
    }

    let prior_var = (config.prior_cv * prior_mean).powi(2).max(f64::MIN_POSITIVE);

    let sample_mean = stats::mean(&values);
    let sample_std = stats::std_dev(&values);
    // A flat sample still carries some assumed noise
    let sample_var = (sample_std * sample_std).max(prior_var * 0.25);

    let n = values.len() as f64;
    let prior_precision = 1.0 / prior_var;
    let data_precision = n / sample_var;

    let posterior_mean = (prior_precision * prior_mean + data_precision * sample_mean)
        / (prior_precision + data_precision);

    RawPrediction::Absolute(posterior_mean)
}

/// Mean of means over repeated resamples of the history with replacement
pub fn bootstrap(ctx: &PredictionContext, rng: &mut dyn RngCore) -> RawPrediction {
    let config = &ctx.config.sparse;
    let values = ctx.series.values();
    if values.is_empty() {
        return RawPrediction::Absolute(ctx.base_revenue);
    }

    let mut resample_means = 0.0;
    for _ in 0..config.bootstrap_rounds {
        let mut sum = 0.0;
        for _ in 0..values.len() {
            sum += values[rng.gen_range(0..values.len())];
        }
        resample_means += sum / values.len() as f64;
    }

    RawPrediction::Absolute(resample_means / config.bootstrap_rounds as f64)
}

/// Interpolated 50th-percentile historical value scaled by the seasonal
/// multiplier
pub fn quantile(ctx: &PredictionContext) -> RawPrediction {
    let values = ctx.series.values();
    if values.is_empty() {
        return RawPrediction::Absolute(ctx.base_revenue);
    }

    let median = stats::percentile(&values, 50.0);
    RawPrediction::Absolute(median * ctx.factors.seasonal_multiplier)
}
