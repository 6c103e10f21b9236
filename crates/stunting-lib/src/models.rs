//! Core data models for the stunting classifier

use serde::{Deserialize, Serialize};

/// Positive class label (low height-for-age).
pub const LABEL_STUNTED: &str = "stunted";

/// Negative class label, collapsing the "normal" and "tall" source
/// categories.
pub const LABEL_NOT_STUNTED: &str = "tidak stunted";

/// Decision threshold on the stunted probability. A tie is classified
/// as stunted.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// One child measurement. Gender is stored as its canonical (or
/// passed-through) string value; missing numerics are `NaN` and are
/// median-imputed by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub age_months: f64,
    pub gender: String,
    pub height_cm: f64,
}

/// Outcome of a single prediction. Constructed fresh per call,
/// immutable, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub proba_stunted: f64,
    pub proba_tidak_stunted: f64,
}

impl PredictionResult {
    /// Derive a result from the two class probabilities. `proba_stunted`
    /// at exactly the threshold classifies as stunted.
    pub fn from_probabilities(proba_stunted: f64, proba_tidak_stunted: f64) -> Self {
        let label = if proba_stunted >= DECISION_THRESHOLD {
            LABEL_STUNTED
        } else {
            LABEL_NOT_STUNTED
        };
        Self {
            label: label.to_string(),
            proba_stunted,
            proba_tidak_stunted,
        }
    }

    pub fn is_stunted(&self) -> bool {
        self.label == LABEL_STUNTED
    }
}
