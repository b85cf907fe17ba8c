//! Kernel-similarity heuristic
//!
//! Gaussian-kernel similarity between the day's factor profile and a few
//! fixed reference day profiles; the similarity-weighted label average
//! perturbs the base revenue multiplicatively.

use crate::methods::{PredictionContext, RawPrediction};

pub fn predict(ctx: &PredictionContext) -> RawPrediction {
    let config = &ctx.config.kernel;
    let profile = ctx.factors.profile();

    let two_sigma_sq = 2.0 * config.bandwidth * config.bandwidth;

    let mut weighted_labels = 0.0;
    let mut similarity_sum = 0.0;
    for reference in &config.references {
        let distance_sq: f64 = profile
            .iter()
            .zip(reference.profile)
            .map(|(x, r)| (x - r).powi(2))
            .sum();
        let similarity = (-distance_sq / two_sigma_sq).exp();

        weighted_labels += reference.label * similarity;
        similarity_sum += similarity;
    }

    // All references effectively infinitely far away: leave the base untouched
    if similarity_sum <= f64::EPSILON {
        return RawPrediction::Multiplier(1.0);
    }

    RawPrediction::Multiplier(weighted_labels / similarity_sum)
}
