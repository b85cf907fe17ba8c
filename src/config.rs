//! Calibration constants for the forecasting engine
//!
//! Every coefficient the engine uses lives here as plain data with a
//! `Default` carrying the original calibration, so tables can be recalibrated
//! or loaded from deployment configuration without touching the combining
//! logic.

use serde::{Deserialize, Serialize};

/// Month and day-of-week seasonal multiplier tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalConfig {
    /// Multiplier per month, January first
    pub month_multipliers: [f64; 12],
    /// Multiplier per weekday, Monday first
    pub weekday_multipliers: [f64; 7],
    /// Bounds on the combined seasonal multiplier
    pub multiplier_range: (f64, f64),
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            month_multipliers: [
                0.85, 0.88, 0.95, 1.00, 1.02, 1.05, 1.08, 1.05, 1.00, 0.98, 1.05, 1.35,
            ],
            weekday_multipliers: [0.90, 0.95, 1.00, 1.00, 1.15, 1.25, 1.10],
            multiplier_range: (0.5, 2.0),
        }
    }
}

/// Impact magnitudes per holiday category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayImpactConfig {
    /// Impact of a major holiday (New Year period, Women's Day)
    pub major: f64,
    /// Impact of an ordinary public holiday
    pub public: f64,
    /// Impact of a patriotic observance
    pub patriotic: f64,
    /// Uplift on the day before a major holiday
    pub pre_holiday: f64,
    /// Bounds on the holiday impact
    pub impact_range: (f64, f64),
}

impl Default for HolidayImpactConfig {
    fn default() -> Self {
        Self {
            major: 0.30,
            public: 0.20,
            patriotic: 0.12,
            pre_holiday: 0.15,
            impact_range: (-0.4, 0.4),
        }
    }
}

/// Monthly climate baselines and impact thresholds for the weather factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Mean daily temperature per month, degrees Celsius, January first
    pub monthly_temperature: [f64; 12],
    /// Probability of a precipitation day per month, January first
    pub monthly_precipitation_chance: [f64; 12],
    /// Standard deviation of daily temperature noise
    pub temperature_noise_std: f64,
    /// Mean precipitation on a wet day, millimetres
    pub wet_day_precipitation: f64,
    /// Mean and standard deviation of daily wind speed, m/s
    pub wind_mean: f64,
    pub wind_std: f64,
    /// Precipitation above this is a heavy-rain/snow day
    pub heavy_precipitation_mm: f64,
    /// Temperature thresholds
    pub severe_cold_below: f64,
    pub severe_heat_above: f64,
    pub comfortable_range: (f64, f64),
    /// Wind above this depresses foot traffic
    pub strong_wind_above: f64,
    /// Impact contributions
    pub heavy_precipitation_impact: f64,
    pub severe_cold_impact: f64,
    pub severe_heat_impact: f64,
    pub comfortable_impact: f64,
    pub strong_wind_impact: f64,
    /// Bounds on the weather impact
    pub impact_range: (f64, f64),
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            // Central-Russia continental climate baseline
            monthly_temperature: [
                -8.0, -7.0, -1.0, 9.0, 17.0, 21.0, 23.0, 21.0, 15.0, 7.0, -1.0, -6.0,
            ],
            monthly_precipitation_chance: [
                0.40, 0.35, 0.35, 0.30, 0.35, 0.40, 0.40, 0.35, 0.35, 0.40, 0.45, 0.45,
            ],
            temperature_noise_std: 4.0,
            wet_day_precipitation: 4.0,
            wind_mean: 5.0,
            wind_std: 3.0,
            heavy_precipitation_mm: 6.0,
            severe_cold_below: -15.0,
            severe_heat_above: 30.0,
            comfortable_range: (15.0, 25.0),
            strong_wind_above: 12.0,
            heavy_precipitation_impact: -0.15,
            severe_cold_impact: -0.20,
            severe_heat_impact: -0.10,
            comfortable_impact: 0.05,
            strong_wind_impact: -0.05,
            impact_range: (-0.4, 0.4),
        }
    }
}

/// Payday-cycle impact bands over the day of month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOfMonthConfig {
    /// (first day, last day, impact), inclusive bands; days outside any band
    /// contribute 0
    pub bands: Vec<(u32, u32, f64)>,
}

impl Default for TimeOfMonthConfig {
    fn default() -> Self {
        Self {
            bands: vec![
                (1, 5, 0.12),
                (6, 10, 0.04),
                (20, 24, 0.06),
                (25, 31, -0.08),
            ],
        }
    }
}

/// Quarterly base level plus a low-amplitude annual cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicCycleConfig {
    /// Base impact per quarter, Q1 first
    pub quarter_base: [f64; 4],
    /// Amplitude of the annual sinusoid over day-of-year
    pub annual_amplitude: f64,
    /// Bounds on the economic impact
    pub impact_range: (f64, f64),
}

impl Default for EconomicCycleConfig {
    fn default() -> Self {
        Self {
            quarter_base: [-0.05, 0.02, 0.04, 0.08],
            annual_amplitude: 0.03,
            impact_range: (-0.2, 0.2),
        }
    }
}

/// A recurring local event with a fixed calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEvent {
    pub month: u32,
    pub day: u32,
    pub impact: f64,
    pub name: String,
}

/// Fixed list of recurring local events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEventConfig {
    pub events: Vec<LocalEvent>,
}

impl Default for LocalEventConfig {
    fn default() -> Self {
        Self {
            events: vec![
                LocalEvent {
                    month: 7,
                    day: 19,
                    impact: 0.15,
                    name: "City Day".to_string(),
                },
                LocalEvent {
                    month: 9,
                    day: 1,
                    impact: 0.10,
                    name: "Knowledge Day".to_string(),
                },
                LocalEvent {
                    month: 5,
                    day: 25,
                    impact: 0.08,
                    name: "Last Bell".to_string(),
                },
            ],
        }
    }
}

/// Coefficients for the linear factor-regression method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearMethodConfig {
    pub trend: f64,
    pub weather: f64,
    pub holiday: f64,
    pub time_of_month: f64,
    pub historical_pattern: f64,
    pub economic: f64,
    pub local_event: f64,
    pub customer_behavior: f64,
    /// Static L2 penalty scale over the coefficients
    pub ridge_lambda: f64,
}

impl Default for LinearMethodConfig {
    fn default() -> Self {
        Self {
            trend: 0.8,
            weather: 0.6,
            holiday: 0.9,
            time_of_month: 0.5,
            historical_pattern: 0.7,
            economic: 0.4,
            local_event: 0.5,
            customer_behavior: 0.6,
            ridge_lambda: 0.01,
        }
    }
}

/// Fixed smoothing constants for the triple exponential smoothing method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Season length in days (weekly cycle)
    pub season_length: usize,
    /// Damping applied to the weighted factor sum
    pub factor_damping: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
            season_length: 7,
            factor_damping: 0.5,
        }
    }
}

/// Parameters of the adaptive moving-average method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    pub min_window: usize,
    pub max_window: usize,
    /// How strongly volatility (CV) shrinks the window
    pub volatility_window_scale: f64,
    /// Exponential decay of weights from the most recent observation backwards
    pub weight_decay: f64,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            min_window: 3,
            max_window: 14,
            volatility_window_scale: 10.0,
            weight_decay: 0.85,
        }
    }
}

/// Parameters of the seasonal autoregressive heuristic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalArConfig {
    /// AR coefficient on the last difference
    pub phi: f64,
    /// MA coefficient on the mean residual
    pub theta: f64,
    /// Coefficient on the seasonal-lag deviation
    pub seasonal_gamma: f64,
    /// Seasonal lag in days
    pub seasonal_lag: usize,
    /// Minimum history length before the seasonal term activates
    pub min_seasonal_periods: usize,
}

impl Default for SeasonalArConfig {
    fn default() -> Self {
        Self {
            phi: 0.5,
            theta: 0.3,
            seasonal_gamma: 0.4,
            seasonal_lag: 7,
            min_seasonal_periods: 12,
        }
    }
}

/// Which factor a threshold rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleFactor {
    Weather,
    Holiday,
    Economic,
    HistoricalPattern,
}

/// One threshold rule of the rule-ensemble method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub factor: RuleFactor,
    /// Rule fires when the factor exceeds this value
    pub threshold: f64,
    /// Multiplier adjustment added when the rule fires
    pub adjustment: f64,
}

/// Fixed, position-weighted rule list for the rule-ensemble method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEnsembleConfig {
    pub rules: Vec<ThresholdRule>,
}

impl Default for RuleEnsembleConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ThresholdRule {
                    factor: RuleFactor::Holiday,
                    threshold: 0.15,
                    adjustment: 0.10,
                },
                ThresholdRule {
                    factor: RuleFactor::HistoricalPattern,
                    threshold: 0.10,
                    adjustment: 0.05,
                },
                ThresholdRule {
                    factor: RuleFactor::Economic,
                    threshold: 0.05,
                    adjustment: 0.03,
                },
                ThresholdRule {
                    factor: RuleFactor::Weather,
                    threshold: 0.02,
                    adjustment: 0.04,
                },
            ],
        }
    }
}

/// A reference day profile for the kernel-similarity method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelReference {
    /// Factor profile: weather, holiday, time-of-month, historical pattern,
    /// economic, customer behavior
    pub profile: [f64; 6],
    /// Revenue multiplier observed for days matching this profile
    pub label: f64,
}

/// Parameters of the kernel-similarity method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelConfig {
    pub bandwidth: f64,
    pub references: Vec<KernelReference>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            bandwidth: 0.35,
            references: vec![
                // Ordinary day
                KernelReference {
                    profile: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    label: 1.0,
                },
                // Holiday surge
                KernelReference {
                    profile: [0.0, 0.25, 0.05, 0.10, 0.05, 0.10],
                    label: 1.25,
                },
                // Slow day
                KernelReference {
                    profile: [-0.15, 0.0, -0.05, -0.10, -0.05, -0.10],
                    label: 0.80,
                },
            ],
        }
    }
}

/// Parameters of the sparse-data methods and their fixed calibration weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseConfig {
    /// Relative standard deviation assumed for the Bayesian prior
    pub prior_cv: f64,
    /// Number of bootstrap resamples
    pub bootstrap_rounds: usize,
    /// Fixed weights; the Bayesian method degrades best with almost no data
    pub bayesian_weight: f64,
    pub bootstrap_weight: f64,
    pub quantile_weight: f64,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            prior_cv: 0.2,
            bootstrap_rounds: 200,
            bayesian_weight: 0.5,
            bootstrap_weight: 0.3,
            quantile_weight: 0.2,
        }
    }
}

/// Reliability scoring boosts and post-processing bands for the ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Score every standard method starts from
    pub base_score: f64,
    /// CV above this counts as high volatility
    pub high_volatility_cv: f64,
    pub volatility_moving_average_boost: f64,
    pub volatility_linear_boost: f64,
    pub volatility_nonlinear_boost: f64,
    /// Absolute normalized trend above this counts as a strong trend
    pub strong_trend: f64,
    pub trend_exponential_boost: f64,
    pub trend_seasonal_ar_boost: f64,
    pub trend_rule_ensemble_boost: f64,
    /// Seasonality strength above this counts as strongly seasonal
    pub strong_seasonality: f64,
    pub seasonality_seasonal_ar_boost: f64,
    pub seasonality_kernel_boost: f64,
    /// Daily histories shorter than this favor the simpler methods
    pub short_history_days: usize,
    pub short_history_linear_boost: f64,
    pub short_history_moving_average_boost: f64,
    /// Standard deviations beyond which post-processing blends toward the mean
    pub outlier_sigma: f64,
    /// Blend weights: result share / historical-mean share
    pub outlier_blend_result: f64,
    pub outlier_blend_mean: f64,
    /// Per-weekday (min, max) multiplicative band around base revenue,
    /// Monday first
    pub weekday_bands: [(f64, f64); 7],
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            base_score: 1.0,
            high_volatility_cv: 0.3,
            volatility_moving_average_boost: 0.8,
            volatility_linear_boost: 0.4,
            volatility_nonlinear_boost: 0.2,
            strong_trend: 0.1,
            trend_exponential_boost: 0.6,
            trend_seasonal_ar_boost: 0.4,
            trend_rule_ensemble_boost: 0.3,
            strong_seasonality: 0.5,
            seasonality_seasonal_ar_boost: 0.7,
            seasonality_kernel_boost: 0.3,
            short_history_days: 30,
            short_history_linear_boost: 0.3,
            short_history_moving_average_boost: 0.3,
            outlier_sigma: 3.0,
            outlier_blend_result: 0.7,
            outlier_blend_mean: 0.3,
            weekday_bands: [
                (0.55, 1.7),
                (0.55, 1.7),
                (0.55, 1.7),
                (0.55, 1.7),
                (0.60, 2.0),
                (0.60, 2.2),
                (0.50, 1.9),
            ],
        }
    }
}

/// Weights, calibration tables and bounds for the confidence estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Weights over: same-weekday volume, monthly stability, day-of-week
    /// seasonality, overall volume, data quality
    pub component_weights: [f64; 5],
    /// Same-weekday samples at which the volume sub-confidence saturates
    pub weekday_volume_target: f64,
    /// Total observations at which the overall-volume sub-confidence saturates
    pub overall_volume_target: f64,
    /// How strongly monthly CV erodes the stability sub-confidence
    pub monthly_cv_sensitivity: f64,
    /// Data-quality blend weights: sample count, monthly coverage,
    /// non-zero-month fraction
    pub quality_weights: [f64; 3],
    /// Observations at which the quality sample score saturates
    pub quality_sample_target: f64,
    /// Day-of-week predictability table, Monday first
    pub weekday_table: [f64; 7],
    /// Instability multipliers for Friday, Saturday, Sunday
    pub friday_factor: f64,
    pub saturday_factor: f64,
    pub sunday_factor: f64,
    /// Clamp bounds on the standard path
    pub standard_range: (f64, f64),
    /// Clamp bounds on the sparse-data path
    pub sparse_range: (f64, f64),
    /// Per-day confidence decay beyond the first horizon week
    pub horizon_decay_per_day: f64,
    /// Floor the decay may not cross on the standard path
    pub decay_floor: f64,
    /// Months of history considered for stability and coverage
    pub coverage_months: usize,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            component_weights: [0.25, 0.25, 0.20, 0.15, 0.15],
            weekday_volume_target: 4.0,
            overall_volume_target: 30.0,
            monthly_cv_sensitivity: 2.0,
            quality_weights: [0.4, 0.3, 0.3],
            quality_sample_target: 30.0,
            weekday_table: [0.85, 0.90, 0.90, 0.88, 0.75, 0.70, 0.72],
            friday_factor: 0.95,
            saturday_factor: 0.90,
            sunday_factor: 0.92,
            standard_range: (0.6, 0.98),
            sparse_range: (0.1, 0.95),
            horizon_decay_per_day: 0.004,
            decay_floor: 0.6,
            coverage_months: 6,
        }
    }
}

/// Complete calibration for one forecasting engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub seasonal: SeasonalConfig,
    pub holidays: HolidayImpactConfig,
    pub weather: WeatherConfig,
    pub time_of_month: TimeOfMonthConfig,
    pub economic: EconomicCycleConfig,
    pub local_events: LocalEventConfig,
    pub linear: LinearMethodConfig,
    pub smoothing: SmoothingConfig,
    pub moving_average: MovingAverageConfig,
    pub seasonal_ar: SeasonalArConfig,
    pub rules: RuleEnsembleConfig,
    pub kernel: KernelConfig,
    pub sparse: SparseConfig,
    pub ensemble: EnsembleConfig,
    pub confidence: ConfidenceConfig,
}

impl SeasonalConfig {
    /// Multiplier for a month, 1-based
    pub fn month_multiplier(&self, month: u32) -> f64 {
        self.month_multipliers[(month as usize - 1) % 12]
    }

    /// Multiplier for a weekday
    pub fn weekday_multiplier(&self, weekday: chrono::Weekday) -> f64 {
        self.weekday_multipliers[weekday.num_days_from_monday() as usize]
    }
}
