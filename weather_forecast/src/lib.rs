//! # Weather Forecast
//!
//! Predicts the likely temperature category and weather conditions for a Sri
//! Lankan city on a given date, from a historical daily weather dataset.
//!
//! ## Pipeline
//!
//! - Load and clean the dataset (`city`, `time`, `temperature_2m_mean`,
//!   `rain_sum`, `weathercode` columns)
//! - Engineer calendar features and encode cities and weather codes
//! - Train a seeded random forest on the engineered rows
//! - Answer point queries against the immutable trained context
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weather_forecast::{predict_weather, DataLoader, ModelContext, PredictorConfig};
//!
//! let config = PredictorConfig::default();
//! let data = DataLoader::from_csv(&config.dataset_path)?;
//! let context = ModelContext::build(&data, &config)?;
//!
//! match predict_weather(&context, "Colombo", "2024-06-15") {
//!     Ok(prediction) => println!("{}: {}", prediction.temperature, prediction.conditions),
//!     Err(err) => println!("{}", err),
//! }
//! # Ok::<(), weather_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod context;
pub mod data;
pub mod encoding;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod predictor;
pub mod trainer;
pub mod utils;
pub mod weather_codes;

// Re-export commonly used types
pub use crate::config::{ForestConfig, PredictorConfig};
pub use crate::context::{CityClimate, ModelContext};
pub use crate::data::{DataLoader, Observation, WeatherData};
pub use crate::encoding::{LabelEncoder, WeatherCode};
pub use crate::error::ForecastError;
pub use crate::features::{FeatureRow, FeatureSet};
pub use crate::models::{ClassificationModel, TrainedClassifier};
pub use crate::predictor::{predict_weather, Prediction, QueryError, Response, TemperatureCategory};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
