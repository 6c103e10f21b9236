//! Random forest fitting with bootstrap sampling and balanced
//! subsample class weights

use super::tree::{grow_tree, DecisionTree, TreeOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Forest hyperparameters. Defaults mirror the shipped training
/// configuration: 200 trees, seed 42.
#[derive(Debug, Clone)]
pub struct ForestOptions {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            n_trees: 200,
            seed: 42,
            max_depth: 32,
            min_samples_split: 2,
        }
    }
}

/// Fit a forest of Gini trees. Each tree sees a bootstrap sample of the
/// rows; class weights are recomputed from the class frequencies within
/// that sample so minority classes are not drowned out.
pub fn fit_forest(x: &[Vec<f64>], y: &[usize], options: &ForestOptions) -> Vec<DecisionTree> {
    let n = x.len();
    let n_features = x.first().map(Vec::len).unwrap_or(0);
    let tree_options = TreeOptions {
        max_features: max_features_for(n_features),
        max_depth: options.max_depth,
        min_samples_split: options.min_samples_split,
    };

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut trees = Vec::with_capacity(options.n_trees);
    for tree_index in 0..options.n_trees {
        let indices: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
        let weights = balanced_subsample_weights(y, &indices);
        let tree = grow_tree(x, y, &weights, &indices, &tree_options, &mut rng);
        debug!(tree_index, depth = tree.depth(), "Fitted forest tree");
        trees.push(tree);
    }
    trees
}

/// `sqrt(d)` candidate features per split, at least one.
fn max_features_for(n_features: usize) -> usize {
    ((n_features as f64).sqrt().round() as usize).max(1)
}

/// Per-sample weights `n_sample / (n_classes * count_class)` computed
/// over one bootstrap sample.
fn balanced_subsample_weights(y: &[usize], indices: &[usize]) -> Vec<f64> {
    let mut counts = [0usize; 2];
    for &i in indices {
        counts[y[i].min(1)] += 1;
    }
    let total = indices.len() as f64;
    let class_weight = |class: usize| {
        if counts[class] == 0 {
            0.0
        } else {
            total / (2.0 * counts[class] as f64)
        }
    };
    let weights = [class_weight(0), class_weight(1)];
    y.iter().map(|&label| weights[label.min(1)]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_dataset() -> (Vec<Vec<f64>>, Vec<usize>) {
        let x: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![if i < 20 { 60.0 + i as f64 } else { 90.0 + i as f64 }])
            .collect();
        let y: Vec<usize> = (0..40).map(|i| usize::from(i < 20)).collect();
        (x, y)
    }

    #[test]
    fn test_forest_is_deterministic_for_a_seed() {
        let (x, y) = separable_dataset();
        let options = ForestOptions {
            n_trees: 5,
            ..ForestOptions::default()
        };
        let a = fit_forest(&x, &y, &options);
        let b = fit_forest(&x, &y, &options);
        let proba = |trees: &[DecisionTree]| {
            trees
                .iter()
                .map(|t| t.predict_proba(&[75.0])[1])
                .sum::<f64>()
        };
        assert_eq!(proba(&a), proba(&b));
    }

    #[test]
    fn test_forest_separates_classes() {
        let (x, y) = separable_dataset();
        let options = ForestOptions {
            n_trees: 15,
            ..ForestOptions::default()
        };
        let trees = fit_forest(&x, &y, &options);
        let mean_proba = |features: &[f64]| {
            trees
                .iter()
                .map(|t| t.predict_proba(features)[1])
                .sum::<f64>()
                / trees.len() as f64
        };
        assert!(mean_proba(&[65.0]) > 0.8);
        assert!(mean_proba(&[125.0]) < 0.2);
    }

    #[test]
    fn test_balanced_subsample_weights() {
        // Sample holds three of class 0 and one of class 1.
        let y = vec![0, 0, 0, 1];
        let indices = vec![0, 1, 2, 3];
        let weights = balanced_subsample_weights(&y, &indices);
        assert!((weights[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((weights[3] - 2.0).abs() < 1e-12);
        // Total weight per class is equal.
        let class0: f64 = weights[..3].iter().sum();
        assert!((class0 - weights[3]).abs() < 1e-12);
    }

    #[test]
    fn test_max_features_sqrt() {
        assert_eq!(max_features_for(0), 1);
        assert_eq!(max_features_for(4), 2);
        assert_eq!(max_features_for(9), 3);
    }
}
