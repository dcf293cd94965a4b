//! Error types for the weather_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Fatal errors raised while loading data, training or configuring the predictor
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to dataset validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised when a classifier cannot be fit
    #[error("Training error: {0}")]
    TrainingError(String),

    /// Error raised by a trained model at prediction time
    #[error("Prediction error: {0}")]
    PredictionError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
