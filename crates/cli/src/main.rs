//! Stunting Classifier CLI
//!
//! Terminal front-end for the stunting classifier: a single-record
//! prediction form, a batch CSV upload flow and a metrics panel. All
//! business logic lives in the library; this binary is presentation
//! glue only.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stunting_lib::Predictor;

/// Stunting Classifier CLI
#[derive(Parser)]
#[command(name = "stunting")]
#[command(author, version, about = "CLI for the stunting classifier", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the nutritional status of one child
    Predict {
        /// Age in months
        #[arg(long)]
        age: f64,

        /// Gender (laki-laki/perempuan, common variants accepted)
        #[arg(long)]
        gender: String,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Path to the model artifact
        #[arg(long, env = "STUNTING_MODEL_PATH", default_value = "models/model.json")]
        model: PathBuf,
    },

    /// Predict a whole CSV upload and write the result file
    Batch {
        /// Input CSV with age, gender and height columns (aliases accepted)
        input: PathBuf,

        /// Where the result CSV is written
        #[arg(long, short, default_value = "predictions.csv")]
        output: PathBuf,

        /// Path to the model artifact
        #[arg(long, env = "STUNTING_MODEL_PATH", default_value = "models/model.json")]
        model: PathBuf,

        /// Number of rows shown in the previews
        #[arg(long, default_value_t = 10)]
        preview: usize,
    },

    /// Show the evaluation metrics of the trained model
    Metrics {
        /// Path to the metrics summary
        #[arg(long, env = "STUNTING_METRICS_PATH", default_value = "models/metrics.json")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let predictor = Predictor::new();

    match cli.command {
        Commands::Predict {
            age,
            gender,
            height,
            model,
        } => {
            commands::predict::run(&predictor, age, &gender, height, &model, cli.format)?;
        }
        Commands::Batch {
            input,
            output,
            model,
            preview,
        } => {
            commands::batch::run(&predictor, &input, &output, &model, preview, cli.format)?;
        }
        Commands::Metrics { path } => {
            commands::metrics::run(&path, cli.format)?;
        }
    }

    Ok(())
}
