//! Trainer configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Paths for a training run. All fields can be overridden through
/// `STUNTING_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Labeled source dataset (CSV).
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Where the fitted model artifact is written.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Where the evaluation summary is written.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: PathBuf,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/data_balita.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/model.json")
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from("models/metrics.json")
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            model_path: default_model_path(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl TrainerConfig {
    /// Load configuration from the environment, falling back to the
    /// repository-relative defaults.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("STUNTING"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }
}
