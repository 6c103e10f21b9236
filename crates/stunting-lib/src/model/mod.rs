//! Model artifact: preprocessing pipeline plus random forest
//!
//! The artifact serializes as one JSON document and round-trips through
//! the same save/load pair used by the trainer and the prediction-time
//! model cache.

mod pipeline;
mod train;
mod tree;

pub use pipeline::Preprocessor;
pub use train::{fit_forest, ForestOptions};
pub use tree::{DecisionTree, Node, TreeOptions};

use crate::error::{Error, Result};
use crate::models::{Record, LABEL_NOT_STUNTED, LABEL_STUNTED};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Artifact format version.
pub const MODEL_VERSION: i64 = 1;

/// The fitted classifier as persisted on disk. Read-only after
/// training; prediction never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StuntingModel {
    pub model_version: i64,
    /// Class names ordered by target index: `[tidak stunted, stunted]`.
    pub classes: Vec<String>,
    /// Unix timestamp of the training run.
    pub trained_at: i64,
    pub preprocessor: Preprocessor,
    pub trees: Vec<DecisionTree>,
}

impl StuntingModel {
    /// Fit the full pipeline. `targets` are binary, 1 = stunted. Gender
    /// values in `records` are expected to be normalized already.
    pub fn fit(records: &[Record], targets: &[usize], options: &ForestOptions) -> Result<Self> {
        if records.is_empty() || records.len() != targets.len() {
            return Err(Error::EmptyDataset);
        }
        let preprocessor = Preprocessor::fit(records);
        let x: Vec<Vec<f64>> = records.iter().map(|r| preprocessor.transform(r)).collect();
        let trees = fit_forest(&x, targets, options);
        Ok(Self {
            model_version: MODEL_VERSION,
            classes: vec![LABEL_NOT_STUNTED.to_string(), LABEL_STUNTED.to_string()],
            trained_at: chrono::Utc::now().timestamp(),
            preprocessor,
            trees,
        })
    }

    /// Mean class distribution over all trees:
    /// `[proba tidak stunted, proba stunted]`.
    pub fn predict_proba(&self, record: &Record) -> [f64; 2] {
        let features = self.preprocessor.transform(record);
        let mut sums = [0.0f64; 2];
        for tree in &self.trees {
            let distribution = tree.predict_proba(&features);
            sums[0] += distribution[0];
            sums[1] += distribution[1];
        }
        let n = self.trees.len() as f64;
        [sums[0] / n, sums[1] / n]
    }

    /// Structural invariants checked after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.model_version != MODEL_VERSION {
            return Err(Error::InvalidArtifact(format!(
                "unsupported model_version {}",
                self.model_version
            )));
        }
        if self.classes.len() != 2 {
            return Err(Error::InvalidArtifact(format!(
                "expected 2 classes, found {}",
                self.classes.len()
            )));
        }
        if self.trees.is_empty() {
            return Err(Error::InvalidArtifact("forest has no trees".to_string()));
        }
        Ok(())
    }

    /// Load and validate an artifact. A missing file is the designated
    /// not-found error so the front-end can render remediation guidance.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Persist the artifact as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), trees = self.trees.len(), "Model artifact saved");
        Ok(())
    }
}
