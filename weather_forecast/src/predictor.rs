//! Point queries: likely temperature category and conditions for a city and date

use crate::calendar::parse_date;
use crate::context::ModelContext;
use crate::error::ForecastError;
use crate::features::FeatureRow;
use crate::models::TrainedClassifier;
use crate::weather_codes;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Qualitative bucket of a mean temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureCategory {
    VeryHot,
    Hot,
    Warm,
    Cool,
    Cold,
}

impl TemperatureCategory {
    /// Bucket a temperature in °C; lower bounds are inclusive
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature >= 32.0 {
            TemperatureCategory::VeryHot
        } else if temperature >= 28.0 {
            TemperatureCategory::Hot
        } else if temperature >= 22.0 {
            TemperatureCategory::Warm
        } else if temperature >= 16.0 {
            TemperatureCategory::Cool
        } else {
            TemperatureCategory::Cold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureCategory::VeryHot => "Very Hot",
            TemperatureCategory::Hot => "Hot",
            TemperatureCategory::Warm => "Warm",
            TemperatureCategory::Cool => "Cool",
            TemperatureCategory::Cold => "Cold",
        }
    }
}

impl fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a query cannot be answered
#[derive(Debug, Error)]
pub enum QueryError {
    /// The city does not occur in the training data
    #[error("City '{0}' not found in dataset.")]
    UnknownCity(String),

    /// The date is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate,

    /// The trained model produced something the context cannot interpret
    #[error(transparent)]
    Model(#[from] ForecastError),
}

impl QueryError {
    /// Whether the caller can fix this by changing the query
    pub fn is_user_error(&self) -> bool {
        matches!(self, QueryError::UnknownCity(_) | QueryError::InvalidDate)
    }
}

/// Successful answer to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub city: String,
    /// The query date exactly as given
    pub date: String,
    /// e.g. `28.4°C (Hot)`
    pub temperature: String,
    /// e.g. `3.2 mm`
    pub rainfall: String,
    /// Description of the predicted weather code
    pub conditions: String,
}

/// `{"error": ...}` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

/// Single JSON object written for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Prediction(Prediction),
    Error(ErrorRecord),
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(ErrorRecord {
            error: message.into(),
        })
    }

    /// Usage error for a program name
    pub fn usage(program: &str) -> Self {
        Response::error(format!("Usage: {} <city> <YYYY-MM-DD>", program))
    }

    /// Serialize as a single line of JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Prediction> for Response {
    fn from(prediction: Prediction) -> Self {
        Response::Prediction(prediction)
    }
}

/// Answer a query for `city` on `date` (`YYYY-MM-DD`).
///
/// The city's historical mean temperature and rainfall stand in for the
/// day's values; only the calendar features come from the query date.
pub fn predict_weather<C: TrainedClassifier>(
    context: &ModelContext<C>,
    city: &str,
    date: &str,
) -> Result<Prediction, QueryError> {
    let climate = context
        .climate(city)
        .ok_or_else(|| QueryError::UnknownCity(city.to_string()))?;
    let parsed = parse_date(date).ok_or(QueryError::InvalidDate)?;

    let city_id = context
        .city_encoder()
        .encode(&city.to_string())
        .ok_or_else(|| QueryError::UnknownCity(city.to_string()))?;

    let row = FeatureRow::new(
        climate.temperature_mean,
        climate.rainfall_sum,
        parsed,
        city_id,
    );
    let code_id = context.classifier().predict(&row.to_vector());
    let code = context.code_encoder().decode(code_id).ok_or_else(|| {
        ForecastError::PredictionError(format!(
            "Classifier returned unknown weather code id {}",
            code_id
        ))
    })?;
    debug!(city, date, code = %code, "predicted weather code");

    let category = TemperatureCategory::from_celsius(climate.temperature_mean);
    Ok(Prediction {
        city: city.to_string(),
        date: date.to_string(),
        temperature: format!("{:.1}°C ({})", climate.temperature_mean, category),
        rainfall: format!("{:.1} mm", climate.rainfall_sum),
        conditions: weather_codes::describe(code.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(40.0, TemperatureCategory::VeryHot)]
    #[case(32.0, TemperatureCategory::VeryHot)]
    #[case(31.9, TemperatureCategory::Hot)]
    #[case(28.0, TemperatureCategory::Hot)]
    #[case(27.9, TemperatureCategory::Warm)]
    #[case(22.0, TemperatureCategory::Warm)]
    #[case(21.9, TemperatureCategory::Cool)]
    #[case(16.0, TemperatureCategory::Cool)]
    #[case(15.9, TemperatureCategory::Cold)]
    #[case(-5.0, TemperatureCategory::Cold)]
    fn test_temperature_category(#[case] temperature: f64, #[case] expected: TemperatureCategory) {
        assert_eq!(TemperatureCategory::from_celsius(temperature), expected);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(TemperatureCategory::VeryHot.to_string(), "Very Hot");
        assert_eq!(TemperatureCategory::Cold.label(), "Cold");
    }

    #[test]
    fn test_query_error_messages() {
        assert_eq!(
            QueryError::UnknownCity("Atlantis".to_string()).to_string(),
            "City 'Atlantis' not found in dataset."
        );
        assert_eq!(
            QueryError::InvalidDate.to_string(),
            "Invalid date format. Use YYYY-MM-DD."
        );
        assert!(QueryError::InvalidDate.is_user_error());
        assert!(!QueryError::Model(ForecastError::PredictionError("x".to_string())).is_user_error());
    }

    #[test]
    fn test_response_json_shapes() {
        let response = Response::from(Prediction {
            city: "Colombo".to_string(),
            date: "2024-06-15".to_string(),
            temperature: "28.4°C (Hot)".to_string(),
            rainfall: "3.2 mm".to_string(),
            conditions: "Mainly clear".to_string(),
        });
        assert_eq!(
            response.to_json().unwrap(),
            r#"{"city":"Colombo","date":"2024-06-15","temperature":"28.4°C (Hot)","rainfall":"3.2 mm","conditions":"Mainly clear"}"#
        );

        assert_eq!(
            Response::usage("weather-predict").to_json().unwrap(),
            r#"{"error":"Usage: weather-predict <city> <YYYY-MM-DD>"}"#
        );
    }
}
