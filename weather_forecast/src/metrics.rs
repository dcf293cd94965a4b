//! Metrics for evaluating classifier performance

use crate::error::{ForecastError, Result};
use crate::models::TrainedClassifier;

/// Fraction of predictions equal to the actual labels
pub fn accuracy_score(actual: &[usize], predicted: &[usize]) -> Result<f64> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::DataError(
            "Actual and predicted labels must have the same non-zero length".to_string(),
        ));
    }

    let correct = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a == p)
        .count();

    Ok(correct as f64 / actual.len() as f64)
}

/// Accuracy of a trained classifier on labelled rows
pub fn evaluate_classifier<C, R>(classifier: &C, features: &[R], targets: &[usize]) -> Result<f64>
where
    C: TrainedClassifier + ?Sized,
    R: AsRef<[f64]>,
{
    let predicted: Vec<usize> = features
        .iter()
        .map(|row| classifier.predict(row.as_ref()))
        .collect();
    accuracy_score(targets, &predicted)
}
