//! Error types for the revenue_forecast crate

use thiserror::Error;

/// Custom error types for the revenue_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to input data validation
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid configuration or parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
