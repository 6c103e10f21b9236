//! stunting-train - offline training entry point
//!
//! Zero-argument binary: reads the labeled dataset, fits the
//! classification pipeline, evaluates it on a stratified hold-out split
//! and writes the model artifact plus the metrics summary. Exits
//! fatally, writing nothing, when the dataset is missing.

use anyhow::{Context, Result};
use stunting_lib::training::{self, TrainingOptions};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting stunting-train");

    let config = config::TrainerConfig::load()?;
    info!(dataset = %config.dataset_path.display(), "Trainer configured");

    let outcome = training::run(
        &config.dataset_path,
        &config.model_path,
        &config.metrics_path,
        &TrainingOptions::default(),
    )
    .context("training run failed")?;

    println!("Saved model  : {}", outcome.model_path.display());
    println!("Saved metrics: {}", outcome.metrics_path.display());
    println!(
        "Accuracy: {:.6} | ROC-AUC: {:.6}",
        outcome.metrics.accuracy, outcome.metrics.roc_auc
    );

    Ok(())
}
