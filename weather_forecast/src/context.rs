//! Immutable bundle of everything a query needs

use crate::config::PredictorConfig;
use crate::data::WeatherData;
use crate::encoding::{LabelEncoder, WeatherCode};
use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::random_forest::TrainedRandomForest;
use crate::models::TrainedClassifier;
use crate::trainer::Trainer;
use crate::utils::{mean, round_one_decimal};
use std::collections::BTreeMap;

/// Historical averages of one city, rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityClimate {
    pub temperature_mean: f64,
    pub rainfall_sum: f64,
}

/// Dataset summary, encoders and trained classifier for one dataset
#[derive(Debug, Clone)]
pub struct ModelContext<C = TrainedRandomForest> {
    climate: BTreeMap<String, CityClimate>,
    cities: LabelEncoder<String>,
    codes: LabelEncoder<WeatherCode>,
    classifier: C,
    holdout_accuracy: Option<f64>,
}

impl ModelContext<TrainedRandomForest> {
    /// Engineer features from `data` and train the random forest
    pub fn build(data: &WeatherData, config: &PredictorConfig) -> Result<Self> {
        let features = FeatureSet::engineer(data);
        let trained = Trainer::from_config(config)?.train(&features)?;

        let mut context = Self::from_parts(&features, trained.classifier)?;
        context.holdout_accuracy = trained.holdout_accuracy;
        Ok(context)
    }
}

impl<C: TrainedClassifier> ModelContext<C> {
    /// Wrap a classifier trained on `features`
    pub fn from_parts(features: &FeatureSet, classifier: C) -> Result<Self> {
        if classifier.n_classes() != features.n_classes() {
            return Err(ForecastError::InvalidParameter(format!(
                "Classifier knows {} classes but the data has {} weather codes",
                classifier.n_classes(),
                features.n_classes()
            )));
        }

        Ok(Self {
            climate: city_climate(features),
            cities: features.city_encoder().clone(),
            codes: features.code_encoder().clone(),
            classifier,
            holdout_accuracy: None,
        })
    }

    /// Historical averages of a city seen in training
    pub fn climate(&self, city: &str) -> Option<CityClimate> {
        self.climate.get(city).copied()
    }

    pub fn city_encoder(&self) -> &LabelEncoder<String> {
        &self.cities
    }

    pub fn code_encoder(&self) -> &LabelEncoder<WeatherCode> {
        &self.codes
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Accuracy measured on the held-out partition during training
    pub fn holdout_accuracy(&self) -> Option<f64> {
        self.holdout_accuracy
    }
}

fn city_climate(features: &FeatureSet) -> BTreeMap<String, CityClimate> {
    let mut per_city: BTreeMap<usize, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for row in features.rows() {
        let (temperatures, rainfall) = per_city.entry(row.city_id).or_default();
        temperatures.push(row.temperature_mean);
        rainfall.push(row.rainfall_sum);
    }

    per_city
        .into_iter()
        .filter_map(|(city_id, (temperatures, rainfall))| {
            let city = features.city_encoder().decode(city_id)?.clone();
            let climate = CityClimate {
                temperature_mean: round_one_decimal(mean(&temperatures)?),
                rainfall_sum: round_one_decimal(mean(&rainfall)?),
            };
            Some((city, climate))
        })
        .collect()
}
