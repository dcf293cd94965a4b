//! CART classification tree with Gini impurity

use crate::error::{ForecastError, Result};
use crate::models::{validate_training_set, ClassificationModel, TrainedClassifier};
use rand::seq::SliceRandom;
use rand::Rng;

/// Growth limits of a single tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Maximum depth, unbounded when `None`
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum number of samples on each side of a split
    pub min_samples_leaf: usize,
    /// Candidate features per split; every feature when `None`
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

/// Untrained decision tree classifier
#[derive(Debug, Clone)]
pub struct DecisionTree {
    /// Name of the model
    name: String,
    config: TreeConfig,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        /// Class probabilities of the training samples that reached this leaf
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Trained decision tree; node 0 is the root
#[derive(Debug, Clone)]
pub struct TrainedDecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Weighted Gini impurity of the two children
    impurity: f64,
}

impl DecisionTree {
    /// Create a new decision tree
    pub fn new(config: TreeConfig) -> Result<Self> {
        if config.min_samples_split < 2 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if config.min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_leaf must be positive".to_string(),
            ));
        }
        if config.max_features == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "max_features must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: match config.max_depth {
                Some(depth) => format!("Decision Tree (max_depth={})", depth),
                None => "Decision Tree".to_string(),
            },
            config,
        })
    }

    /// Grow a tree on the rows named by `sample`, which may repeat rows
    pub(crate) fn fit_sample<R, G>(
        &self,
        features: &[R],
        targets: &[usize],
        n_classes: usize,
        mut sample: Vec<usize>,
        rng: &mut G,
    ) -> TrainedDecisionTree
    where
        R: AsRef<[f64]>,
        G: Rng + ?Sized,
    {
        let n_features = features.first().map_or(0, |row| row.as_ref().len());
        let mut builder = TreeBuilder {
            features,
            targets,
            n_classes,
            n_features,
            config: &self.config,
            rng,
            nodes: Vec::new(),
        };
        builder.grow(&mut sample, 0);

        TrainedDecisionTree {
            nodes: builder.nodes,
            n_classes,
        }
    }
}

impl ClassificationModel for DecisionTree {
    type Trained = TrainedDecisionTree;

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
        validate_training_set(features, targets, n_classes)?;
        let sample = (0..features.len()).collect();
        Ok(self.fit_sample(features, targets, n_classes, sample, rng))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedDecisionTree {
    /// Number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root to leaf path
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, node: usize) -> usize {
        match &self.nodes[node] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
        }
    }

    fn leaf_distribution(&self, features: &[f64]) -> &[f64] {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                    node = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl TrainedClassifier for TrainedDecisionTree {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        self.leaf_distribution(features).to_vec()
    }
}

struct TreeBuilder<'a, R, G: ?Sized> {
    features: &'a [R],
    targets: &'a [usize],
    n_classes: usize,
    n_features: usize,
    config: &'a TreeConfig,
    rng: &'a mut G,
    nodes: Vec<Node>,
}

impl<'a, R, G> TreeBuilder<'a, R, G>
where
    R: AsRef<[f64]>,
    G: Rng + ?Sized,
{
    fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[row].as_ref()[feature]
    }

    fn class_counts(&self, sample: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &row in sample {
            counts[self.targets[row]] += 1;
        }
        counts
    }

    /// Grow the subtree for `sample` and return the id of its root
    fn grow(&mut self, sample: &mut [usize], depth: usize) -> usize {
        let counts = self.class_counts(sample);
        let node_id = self.nodes.len();

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_deep = self.config.max_depth.is_some_and(|max| depth >= max);
        let too_small = sample.len() < self.config.min_samples_split;

        let split = if pure || too_deep || too_small {
            None
        } else {
            self.best_split(sample, &counts)
        };

        let Some(split) = split else {
            self.nodes.push(Node::Leaf {
                distribution: distribution(&counts),
            });
            return node_id;
        };

        // Placeholder until both children exist
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let mut mid = 0;
        for k in 0..sample.len() {
            if self.value(sample[k], split.feature) <= split.threshold {
                sample.swap(k, mid);
                mid += 1;
            }
        }
        let (left_sample, right_sample) = sample.split_at_mut(mid);
        let left = self.grow(left_sample, depth + 1);
        let right = self.grow(right_sample, depth + 1);

        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }

    fn best_split(&mut self, sample: &[usize], counts: &[usize]) -> Option<SplitCandidate> {
        let max_features = self
            .config
            .max_features
            .map_or(self.n_features, |k| k.min(self.n_features));

        let mut order: Vec<usize> = (0..self.n_features).collect();
        order.shuffle(&mut *self.rng);

        // Keep drawing features past max_features until one of them can split
        let mut best: Option<SplitCandidate> = None;
        for (visited, &feature) in order.iter().enumerate() {
            if visited >= max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(feature, sample, counts) {
                if best.map_or(true, |b| candidate.impurity < b.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_split_on(
        &self,
        feature: usize,
        sample: &[usize],
        counts: &[usize],
    ) -> Option<SplitCandidate> {
        let mut sorted = sample.to_vec();
        sorted.sort_by(|&a, &b| self.value(a, feature).total_cmp(&self.value(b, feature)));

        let n = sorted.len();
        let min_leaf = self.config.min_samples_leaf;
        let mut left = vec![0; self.n_classes];
        let mut right = counts.to_vec();
        let mut best: Option<SplitCandidate> = None;

        for pos in 0..n.saturating_sub(1) {
            let class = self.targets[sorted[pos]];
            left[class] += 1;
            right[class] -= 1;

            let n_left = pos + 1;
            let n_right = n - n_left;
            if n_left < min_leaf || n_right < min_leaf {
                continue;
            }

            let current = self.value(sorted[pos], feature);
            let next = self.value(sorted[pos + 1], feature);
            if !(current < next) {
                continue;
            }

            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;
            if best.map_or(true, |b| impurity < b.impurity) {
                let mut threshold = current + (next - current) / 2.0;
                if threshold >= next {
                    threshold = current;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }
}

/// Gini impurity of a node holding `total` samples with the given class counts
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn distribution(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts.iter().map(|&c| c as f64 / total as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gini() {
        assert_relative_eq!(gini(&[5, 0], 5), 0.0);
        assert_relative_eq!(gini(&[2, 2], 4), 0.5);
        assert_relative_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_separable_data_is_learned_exactly() {
        let features = vec![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [10.0, 0.0], [11.0, 0.0]];
        let targets = vec![0, 0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::new(TreeConfig::default())
            .unwrap()
            .train(&features, &targets, 2, &mut rng)
            .unwrap();

        for (row, &target) in features.iter().zip(&targets) {
            assert_eq!(tree.predict(row), target);
        }
        assert_eq!(tree.predict(&[6.6, 0.0]), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let features: Vec<[f64; 1]> = (0..16).map(|i| [i as f64]).collect();
        let targets: Vec<usize> = (0..16).map(|i| i % 2).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let config = TreeConfig {
            max_depth: Some(2),
            ..TreeConfig::default()
        };
        let tree = DecisionTree::new(config)
            .unwrap()
            .train(&features, &targets, 2, &mut rng)
            .unwrap();
        assert!(tree.depth() <= 2);

        let proba = tree.predict_proba(&[3.0]);
        assert_relative_eq!(proba.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_features_give_majority_leaf() {
        let features = vec![[1.0], [1.0], [1.0]];
        let targets = vec![2, 0, 2];
        let mut rng = StdRng::seed_from_u64(3);

        let tree = DecisionTree::new(TreeConfig::default())
            .unwrap()
            .train(&features, &targets, 3, &mut rng)
            .unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[1.0]), 2);
    }

    #[test]
    fn test_invalid_config() {
        let config = TreeConfig {
            min_samples_leaf: 0,
            ..TreeConfig::default()
        };
        assert!(DecisionTree::new(config).is_err());
    }
}
