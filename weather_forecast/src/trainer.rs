//! Fitting the weather code classifier on an engineered feature set

use crate::config::PredictorConfig;
use crate::error::{ForecastError, Result};
use crate::features::{FeatureSet, FeatureVector};
use crate::metrics::evaluate_classifier;
use crate::models::random_forest::RandomForest;
use crate::models::ClassificationModel;
use crate::utils::train_test_split;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Classifier fit on the training partition plus its held-out score
#[derive(Debug, Clone)]
pub struct TrainedModel<C> {
    pub classifier: C,
    /// Accuracy on the held-out rows, `None` when nothing was held out
    pub holdout_accuracy: Option<f64>,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Splits a feature set, fits a model and scores it on the held-out rows
#[derive(Debug, Clone)]
pub struct Trainer<M> {
    model: M,
    seed: u64,
    test_ratio: f64,
}

impl Trainer<RandomForest> {
    /// Random forest trainer configured from a predictor configuration
    pub fn from_config(config: &PredictorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            RandomForest::new(config.forest.clone())?,
            config.seed,
            config.test_ratio,
        ))
    }
}

impl<M: ClassificationModel> Trainer<M> {
    pub fn new(model: M, seed: u64, test_ratio: f64) -> Self {
        Self {
            model,
            seed,
            test_ratio,
        }
    }

    /// Fit the model on the weather code targets of `features`.
    ///
    /// One RNG seeded from the configured seed drives the split and the model,
    /// so the same data and seed always give the same classifier.
    pub fn train(&self, features: &FeatureSet) -> Result<TrainedModel<M::Trained>> {
        if features.len() < 2 {
            return Err(ForecastError::TrainingError(format!(
                "At least 2 samples are required, got {}",
                features.len()
            )));
        }
        let distinct = distinct_targets(features.targets());
        if distinct < 2 {
            return Err(ForecastError::TrainingError(format!(
                "At least 2 distinct weather codes are required, got {}",
                distinct
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let matrix = features.matrix();
        let targets = features.targets();

        let split = train_test_split(matrix.len(), self.test_ratio, &mut rng);
        let (train_x, train_y) = select_rows(&matrix, targets, &split.train);
        let (test_x, test_y) = select_rows(&matrix, targets, &split.test);
        debug!(
            train = train_x.len(),
            test = test_x.len(),
            "partitioned feature rows"
        );

        let classifier = self
            .model
            .train(&train_x, &train_y, features.n_classes(), &mut rng)?;

        let holdout_accuracy = if test_x.is_empty() {
            None
        } else {
            Some(evaluate_classifier(&classifier, &test_x, &test_y)?)
        };

        info!(
            model = self.model.name(),
            train_rows = train_x.len(),
            test_rows = test_x.len(),
            holdout_accuracy = ?holdout_accuracy,
            "trained weather code classifier"
        );

        Ok(TrainedModel {
            classifier,
            holdout_accuracy,
            train_rows: train_x.len(),
            test_rows: test_x.len(),
        })
    }
}

fn distinct_targets(targets: &[usize]) -> usize {
    let mut seen: Vec<usize> = targets.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

fn select_rows(
    matrix: &[FeatureVector],
    targets: &[usize],
    rows: &[usize],
) -> (Vec<FeatureVector>, Vec<usize>) {
    rows.iter().map(|&i| (matrix[i], targets[i])).unzip()
}
