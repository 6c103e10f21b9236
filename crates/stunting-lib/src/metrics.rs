//! Evaluation metrics and the persisted metrics summary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 2x2 confusion matrix, rows = truth, columns = predicted
/// (index 1 = stunted).
#[derive(Debug, Clone, Default)]
pub struct ConfusionMatrix {
    counts: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        self.counts[truth.min(1)][predicted.min(1)] += 1;
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u64 {
        self.counts[truth][predicted]
    }

    pub fn as_array(&self) -> [[u64; 2]; 2] {
        self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Fraction of predictions on the diagonal.
pub fn accuracy(cm: &ConfusionMatrix) -> f64 {
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    (cm.get(0, 0) + cm.get(1, 1)) as f64 / total as f64
}

/// Per-class precision/recall/F1 block of the classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: u64,
}

/// Classification report keyed by class name.
pub fn classification_report(
    cm: &ConfusionMatrix,
    class_names: &[String],
) -> BTreeMap<String, ClassReport> {
    let mut report = BTreeMap::new();
    for (class, name) in class_names.iter().enumerate().take(2) {
        let tp = cm.get(class, class) as f64;
        let fp = cm.get(1 - class, class) as f64;
        let fn_ = cm.get(class, 1 - class) as f64;
        let support = cm.get(class, 0) + cm.get(class, 1);

        let precision = if tp + fp == 0.0 { 0.0 } else { tp / (tp + fp) };
        let recall = if tp + fn_ == 0.0 { 0.0 } else { tp / (tp + fn_) };
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        report.insert(
            name.clone(),
            ClassReport {
                precision,
                recall,
                f1_score,
                support,
            },
        );
    }
    report
}

/// Area under the ROC curve from positive-class scores, computed as the
/// Mann-Whitney rank statistic with tie-averaged ranks. Degenerate
/// inputs (a single class) score 0.5.
pub fn roc_auc(scores: &[f64], targets: &[usize]) -> f64 {
    let n_pos = targets.iter().filter(|&&t| t == 1).count();
    let n_neg = targets.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Average ranks over tied score runs.
    let mut ranks = vec![0.0f64; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && scores[order[end + 1]] == scores[order[start]] {
            end += 1;
        }
        let mean_rank = (start + end) as f64 / 2.0 + 1.0;
        for &index in &order[start..=end] {
            ranks[index] = mean_rank;
        }
        start = end + 1;
    }

    let positive_rank_sum: f64 = targets
        .iter()
        .zip(&ranks)
        .filter(|(&t, _)| t == 1)
        .map(|(_, &r)| r)
        .sum();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    (positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}

/// Parameters of the evaluation split, persisted for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitParams {
    pub test_size: f64,
    pub random_state: u64,
    pub stratify: bool,
}

/// The metrics document written next to the model artifact. Absence of
/// this file is non-fatal for the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub accuracy: f64,
    pub roc_auc: f64,
    pub confusion_matrix: [[u64; 2]; 2],
    pub classification_report: BTreeMap<String, ClassReport>,
    pub train_test_split: SplitParams,
    pub notes: String,
}
