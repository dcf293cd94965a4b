//! Feature engineering: calendar features plus encoded categories

use crate::calendar::CalendarFeatures;
use crate::data::WeatherData;
use crate::encoding::{LabelEncoder, WeatherCode};
use chrono::NaiveDate;
use tracing::info;

/// Number of features in a feature vector
pub const NUM_FEATURES: usize = 8;

/// Feature names, in vector order
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "temperature_mean",
    "rainfall_sum",
    "day_of_year",
    "month",
    "year",
    "day_of_week",
    "is_weekend",
    "city_id",
];

/// Ordered numeric input of the classifier
pub type FeatureVector = [f64; NUM_FEATURES];

/// Model inputs for one observation or one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub temperature_mean: f64,
    pub rainfall_sum: f64,
    pub calendar: CalendarFeatures,
    pub city_id: usize,
}

impl FeatureRow {
    pub fn new(temperature_mean: f64, rainfall_sum: f64, date: NaiveDate, city_id: usize) -> Self {
        Self {
            temperature_mean,
            rainfall_sum,
            calendar: CalendarFeatures::from_date(date),
            city_id,
        }
    }

    /// Convert to the vector layout named by [`FEATURE_NAMES`]
    pub fn to_vector(&self) -> FeatureVector {
        [
            self.temperature_mean,
            self.rainfall_sum,
            self.calendar.day_of_year as f64,
            self.calendar.month as f64,
            self.calendar.year as f64,
            self.calendar.day_of_week as f64,
            if self.calendar.is_weekend { 1.0 } else { 0.0 },
            self.city_id as f64,
        ]
    }
}

/// Engineered training set together with the encoders it was built with
#[derive(Debug, Clone)]
pub struct FeatureSet {
    rows: Vec<FeatureRow>,
    targets: Vec<usize>,
    cities: LabelEncoder<String>,
    codes: LabelEncoder<WeatherCode>,
}

impl FeatureSet {
    /// Fit both encoders on the dataset and engineer one row per observation
    pub fn engineer(data: &WeatherData) -> Self {
        let observations = data.observations();
        let cities = LabelEncoder::fit(observations.iter().map(|o| o.city.clone()));
        let codes = LabelEncoder::fit(observations.iter().map(|o| o.weather_code.clone()));

        let mut rows = Vec::with_capacity(observations.len());
        let mut targets = Vec::with_capacity(observations.len());
        for observation in observations {
            // Both encoders were fit on these very observations
            let (Some(city_id), Some(code_id)) = (
                cities.encode(&observation.city),
                codes.encode(&observation.weather_code),
            ) else {
                continue;
            };
            rows.push(FeatureRow::new(
                observation.temperature_mean,
                observation.rainfall_sum,
                observation.date,
                city_id,
            ));
            targets.push(code_id);
        }

        info!(
            rows = rows.len(),
            cities = cities.len(),
            weather_codes = codes.len(),
            "engineered features"
        );

        Self {
            rows,
            targets,
            cities,
            codes,
        }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Encoded weather code of each row
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Feature matrix in row order
    pub fn matrix(&self) -> Vec<FeatureVector> {
        self.rows.iter().map(FeatureRow::to_vector).collect()
    }

    pub fn city_encoder(&self) -> &LabelEncoder<String> {
        &self.cities
    }

    pub fn code_encoder(&self) -> &LabelEncoder<WeatherCode> {
        &self.codes
    }

    /// Number of distinct target classes
    pub fn n_classes(&self) -> usize {
        self.codes.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn observation(city: &str, date: &str, code: &str) -> Observation {
        Observation {
            city: city.to_string(),
            date: date.parse().unwrap(),
            temperature_mean: 27.5,
            rainfall_sum: 4.0,
            weather_code: WeatherCode::new(code),
        }
    }

    #[test]
    fn test_vector_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let row = FeatureRow::new(28.4, 3.2, date, 3);
        assert_eq!(
            row.to_vector(),
            [28.4, 3.2, 167.0, 6.0, 2024.0, 5.0, 1.0, 3.0]
        );
        assert_eq!(FEATURE_NAMES[7], "city_id");
    }

    #[test]
    fn test_engineer_encodes_every_row() {
        let data = WeatherData::from_observations(vec![
            observation("Kandy", "2020-01-01", "63"),
            observation("Colombo", "2020-01-01", "3"),
            observation("Kandy", "2020-01-02", "3"),
        ])
        .unwrap();

        let features = FeatureSet::engineer(&data);
        assert_eq!(features.len(), 3);
        assert_eq!(features.n_classes(), 2);
        assert_eq!(features.targets(), &[1, 0, 0]);
        assert_eq!(
            features.rows().iter().map(|r| r.city_id).collect::<Vec<_>>(),
            vec![1, 0, 1]
        );
        assert_eq!(features.matrix()[0][2], 1.0);
    }
}
