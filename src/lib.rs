//! # Lanka Weather
//!
//! Workspace facade over [`weather_forecast`], the Sri Lankan city weather
//! predictor.
//!
//! ## Example
//!
//! ```
//! use lanka_weather_workspace::TemperatureCategory;
//!
//! let category = TemperatureCategory::from_celsius(28.4);
//! assert_eq!(category.label(), "Hot");
//! ```

pub use weather_forecast::*;
