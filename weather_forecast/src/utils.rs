//! Utility functions for the weather_forecast crate

use rand::seq::SliceRandom;
use rand::Rng;

/// Row indices of a train/test partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..len` and hold out `ceil(len * test_ratio)` rows for testing.
///
/// At least one row is always kept for training. A ratio outside (0, 1)
/// keeps every row in the training partition.
pub fn train_test_split<G: Rng + ?Sized>(len: usize, test_ratio: f64, rng: &mut G) -> SplitIndices {
    let mut indices: Vec<usize> = (0..len).collect();
    if len == 0 || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return SplitIndices {
            train: indices,
            test: Vec::new(),
        };
    }

    indices.shuffle(rng);
    let test_size = ((len as f64 * test_ratio).ceil() as usize).min(len - 1);
    let train = indices.split_off(test_size);

    SplitIndices {
        train,
        test: indices,
    }
}

/// Round to one decimal place, halves to even
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
