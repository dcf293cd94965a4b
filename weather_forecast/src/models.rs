//! Classification models mapping feature vectors to weather code ids

use crate::error::{ForecastError, Result};
use rand::Rng;

/// Common interface for untrained classifiers
pub trait ClassificationModel {
    /// The trained version of this model
    type Trained: TrainedClassifier;

    /// Fit the model on rows of `features` labelled with `targets` in `0..n_classes`
    fn train<R, G>(
        &self,
        features: &[R],
        targets: &[usize],
        n_classes: usize,
        rng: &mut G,
    ) -> Result<Self::Trained>
    where
        R: AsRef<[f64]>,
        G: Rng + ?Sized;

    /// Get the model's name
    fn name(&self) -> &str;
}

/// Interface for trained classifiers
pub trait TrainedClassifier {
    /// Number of classes the model was trained for
    fn n_classes(&self) -> usize;

    /// Estimated probability of every class for one feature vector
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;

    /// Most probable class; ties go to the lowest class id
    fn predict(&self, features: &[f64]) -> usize {
        argmax(&self.predict_proba(features))
    }
}

/// Index of the largest value, preferring the first one on ties
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

/// Check that a training set is well formed
pub(crate) fn validate_training_set<R: AsRef<[f64]>>(
    features: &[R],
    targets: &[usize],
    n_classes: usize,
) -> Result<usize> {
    if features.is_empty() {
        return Err(ForecastError::TrainingError(
            "Cannot train on an empty data set".to_string(),
        ));
    }
    if features.len() != targets.len() {
        return Err(ForecastError::TrainingError(format!(
            "Features length ({}) doesn't match targets length ({})",
            features.len(),
            targets.len()
        )));
    }
    if let Some(target) = targets.iter().find(|&&t| t >= n_classes) {
        return Err(ForecastError::TrainingError(format!(
            "Target {} is outside of the {} known classes",
            target, n_classes
        )));
    }

    let n_features = features[0].as_ref().len();
    if n_features == 0 {
        return Err(ForecastError::TrainingError(
            "Feature vectors are empty".to_string(),
        ));
    }
    if features.iter().any(|row| row.as_ref().len() != n_features) {
        return Err(ForecastError::TrainingError(
            "Feature vectors have different lengths".to_string(),
        ));
    }
    Ok(n_features)
}

pub mod decision_tree;
pub mod random_forest;
