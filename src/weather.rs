//! Weather collaborator
//!
//! The original deployment fed the dashboard daily weather rows from an
//! external archive; the core only ever sees one [`WeatherSample`] per day.
//! The built-in [`SimulatedWeather`] synthesizes plausible conditions around
//! monthly climate baselines using the engine's injected RNG, so a real
//! provider can replace it behind the same trait.

use crate::config::WeatherConfig;
use chrono::{Datelike, NaiveDate};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Daily weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Mean temperature, degrees Celsius
    pub temperature: f64,
    /// Total precipitation, millimetres
    pub precipitation: f64,
    /// Maximum wind speed, m/s
    pub wind_speed: f64,
}

/// Source of daily weather for forecast dates
pub trait WeatherProvider {
    /// Conditions for `date`; `rng` is only consumed by synthetic providers
    fn conditions(&self, date: NaiveDate, rng: &mut dyn RngCore) -> WeatherSample;
}

/// Synthetic weather around monthly climate baselines
#[derive(Debug, Clone)]
pub struct SimulatedWeather {
    config: WeatherConfig,
}

impl SimulatedWeather {
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }
}

impl Default for SimulatedWeather {
    fn default() -> Self {
        Self::new(WeatherConfig::default())
    }
}

impl WeatherProvider for SimulatedWeather {
    fn conditions(&self, date: NaiveDate, rng: &mut dyn RngCore) -> WeatherSample {
        let month_idx = (date.month() as usize - 1) % 12;

        let temperature = self.config.monthly_temperature[month_idx]
            + sample_normal(rng, 0.0, self.config.temperature_noise_std);

        let wet_day = rng.gen::<f64>() < self.config.monthly_precipitation_chance[month_idx];
        let precipitation = if wet_day {
            sample_normal(
                rng,
                self.config.wet_day_precipitation,
                self.config.wet_day_precipitation / 2.0,
            )
            .max(0.1)
        } else {
            0.0
        };

        let wind_speed = sample_normal(rng, self.config.wind_mean, self.config.wind_std).max(0.0);

        WeatherSample {
            temperature,
            precipitation,
            wind_speed,
        }
    }
}

fn sample_normal(rng: &mut dyn RngCore, mean: f64, std: f64) -> f64 {
    match Normal::new(mean, std.max(f64::MIN_POSITIVE)) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}
