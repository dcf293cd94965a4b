//! Bagged ensemble of decision trees

use crate::config::ForestConfig;
use crate::error::Result;
use crate::models::decision_tree::{DecisionTree, TrainedDecisionTree, TreeConfig};
use crate::models::{validate_training_set, ClassificationModel, TrainedClassifier};
use rand::Rng;
use tracing::debug;

/// Untrained random forest classifier
#[derive(Debug, Clone)]
pub struct RandomForest {
    /// Name of the model
    name: String,
    config: ForestConfig,
}

/// Trained random forest
#[derive(Debug, Clone)]
pub struct TrainedRandomForest {
    trees: Vec<TrainedDecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Create a new random forest
    pub fn new(config: ForestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: format!("Random Forest (trees={})", config.n_trees),
            config,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}

impl ClassificationModel for RandomForest {
    type Trained = TrainedRandomForest;

    fn train<R, G>(
        &self,
        features: &[R],
        targets: &[usize],
        n_classes: usize,
        rng: &mut G,
    ) -> Result<Self::Trained>
    where
        R: AsRef<[f64]>,
        G: Rng + ?Sized,
    {
        let n_features = validate_training_set(features, targets, n_classes)?;
        let tree = DecisionTree::new(TreeConfig {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: Some(self.config.features_per_split(n_features)),
        })?;

        let n = features.len();
        let mut trees = Vec::with_capacity(self.config.n_trees);
        for index in 0..self.config.n_trees {
            // Bootstrap sample: n draws with replacement
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let trained = tree.fit_sample(features, targets, n_classes, sample, rng);
            debug!(
                tree = index,
                nodes = trained.node_count(),
                depth = trained.depth(),
                "grew tree"
            );
            trees.push(trained);
        }

        Ok(TrainedRandomForest { trees, n_classes })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedRandomForest {
    pub fn trees(&self) -> &[TrainedDecisionTree] {
        &self.trees
    }
}

impl TrainedClassifier for TrainedRandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Mean of the per-tree class probabilities
    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (total, p) in proba.iter_mut().zip(tree.predict_proba(features)) {
                *total += p;
            }
        }
        let n_trees = self.trees.len().max(1) as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }
}
