//! Weighted binary classification tree
//!
//! Splits minimize weighted Gini impurity; leaves store the weighted
//! class distribution so the forest can average probabilities.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Tree node. `value <= threshold` goes left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Normalized class distribution `[not stunted, stunted]`.
        distribution: [f64; 2],
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: Node,
}

impl DecisionTree {
    /// Class distribution at the leaf this feature vector falls into.
    pub fn predict_proba(&self, features: &[f64]) -> [f64; 2] {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { distribution } => return *distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }
}

/// Growth limits for a single tree.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Number of candidate features per split.
    pub max_features: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

/// Grow a tree on the rows selected by `indices` (duplicates allowed,
/// as produced by bootstrap sampling). `weights` are per-sample.
pub fn grow_tree(
    x: &[Vec<f64>],
    y: &[usize],
    weights: &[f64],
    indices: &[usize],
    options: &TreeOptions,
    rng: &mut StdRng,
) -> DecisionTree {
    let n_features = x.first().map(Vec::len).unwrap_or(0);
    let root = build_node(x, y, weights, indices, n_features, options, rng, 0);
    DecisionTree { root }
}

#[allow(clippy::too_many_arguments)]
fn build_node(
    x: &[Vec<f64>],
    y: &[usize],
    weights: &[f64],
    indices: &[usize],
    n_features: usize,
    options: &TreeOptions,
    rng: &mut StdRng,
    depth: usize,
) -> Node {
    let counts = weighted_counts(y, weights, indices);
    let total = counts[0] + counts[1];

    let pure = counts[0] == 0.0 || counts[1] == 0.0;
    if pure
        || depth >= options.max_depth
        || indices.len() < options.min_samples_split
        || n_features == 0
    {
        return leaf(counts, total);
    }

    let Some(split) = best_split(x, y, weights, indices, n_features, &counts, options, rng) else {
        return leaf(counts, total);
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][split.feature] <= split.threshold);
    if left_indices.is_empty() || right_indices.is_empty() {
        return leaf(counts, total);
    }

    let left = build_node(
        x,
        y,
        weights,
        &left_indices,
        n_features,
        options,
        rng,
        depth + 1,
    );
    let right = build_node(
        x,
        y,
        weights,
        &right_indices,
        n_features,
        options,
        rng,
        depth + 1,
    );
    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn leaf(counts: [f64; 2], total: f64) -> Node {
    let distribution = if total > 0.0 {
        [counts[0] / total, counts[1] / total]
    } else {
        [0.5, 0.5]
    };
    Node::Leaf { distribution }
}

fn weighted_counts(y: &[usize], weights: &[f64], indices: &[usize]) -> [f64; 2] {
    let mut counts = [0.0f64; 2];
    for &i in indices {
        counts[y[i].min(1)] += weights[i];
    }
    counts
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[allow(clippy::too_many_arguments)]
fn best_split(
    x: &[Vec<f64>],
    y: &[usize],
    weights: &[f64],
    indices: &[usize],
    n_features: usize,
    parent_counts: &[f64; 2],
    options: &TreeOptions,
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);
    features.truncate(options.max_features.clamp(1, n_features));

    let parent_total = parent_counts[0] + parent_counts[1];
    let parent_impurity = parent_total * gini(parent_counts);

    let mut best: Option<SplitCandidate> = None;
    for feature in features {
        if let Some(candidate) = best_split_for_feature(x, y, weights, indices, feature) {
            if candidate.impurity < best.map_or(parent_impurity, |b| b.impurity) {
                best = Some(candidate);
            }
        }
    }
    best
}

fn best_split_for_feature(
    x: &[Vec<f64>],
    y: &[usize],
    weights: &[f64],
    indices: &[usize],
    feature: usize,
) -> Option<SplitCandidate> {
    let mut ordered: Vec<usize> = indices.to_vec();
    ordered.sort_by(|&a, &b| {
        x[a][feature]
            .partial_cmp(&x[b][feature])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut right = [0.0f64; 2];
    for &i in &ordered {
        right[y[i].min(1)] += weights[i];
    }
    let mut left = [0.0f64; 2];

    let mut best: Option<SplitCandidate> = None;
    for window in 0..ordered.len().saturating_sub(1) {
        let i = ordered[window];
        left[y[i].min(1)] += weights[i];
        right[y[i].min(1)] -= weights[i];

        let current = x[i][feature];
        let next = x[ordered[window + 1]][feature];
        if next <= current {
            continue;
        }

        let left_total = left[0] + left[1];
        let right_total = right[0] + right[1];
        if left_total <= 0.0 || right_total <= 0.0 {
            continue;
        }

        let impurity = left_total * gini(&left) + right_total * gini(&right);
        if best.map_or(true, |b| impurity < b.impurity) {
            best = Some(SplitCandidate {
                feature,
                threshold: current + (next - current) / 2.0,
                impurity,
            });
        }
    }
    best
}

fn gini(counts: &[f64; 2]) -> f64 {
    let total = counts[0] + counts[1];
    if total <= 0.0 {
        return 0.0;
    }
    let p0 = counts[0] / total;
    let p1 = counts[1] / total;
    1.0 - p0 * p0 - p1 * p1
}
