//! Runtime configuration for loading, training and prediction

use crate::error::{ForecastError, Result};
use std::path::PathBuf;

/// Dataset file looked up in the working directory when nothing else is given
pub const DEFAULT_DATASET_PATH: &str = "SriLanka_Weather_Dataset.csv";

/// Seed shared by the train/test split and the ensemble
pub const DEFAULT_SEED: u64 = 42;

/// Fraction of rows held out from training
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Hyper-parameters of the random forest
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth of each tree, unbounded when `None`
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum number of samples on each side of a split
    pub min_samples_leaf: usize,
    /// Candidate features per split; `None` means `floor(sqrt(n_features))`
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

impl ForestConfig {
    /// Check the hyper-parameters for values that cannot produce a forest
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of trees must be positive".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "Maximum depth must be positive".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_leaf must be positive".to_string(),
            ));
        }
        if self.max_features == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the number of candidate features for a given feature count
    pub fn features_per_split(&self, n_features: usize) -> usize {
        match self.max_features {
            Some(k) => k.min(n_features).max(1),
            None => ((n_features as f64).sqrt().floor() as usize).max(1),
        }
    }
}

/// Configuration of a single predictor run
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    /// Path of the historical dataset
    pub dataset_path: PathBuf,
    /// Seed for every random choice made during training
    pub seed: u64,
    /// Fraction of rows held out for accuracy reporting
    pub test_ratio: f64,
    /// Ensemble hyper-parameters
    pub forest: ForestConfig,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            seed: DEFAULT_SEED,
            test_ratio: DEFAULT_TEST_RATIO,
            forest: ForestConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Create a configuration for the given dataset with default training parameters
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            ..Self::default()
        }
    }

    /// Replace the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the number of trees
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.forest.n_trees = n_trees;
        self
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Test ratio must be between 0 and 1, got {}",
                self.test_ratio
            )));
        }
        self.forest.validate()
    }
}
