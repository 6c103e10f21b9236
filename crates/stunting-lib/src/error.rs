//! Typed errors for the stunting classifier library

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures the library can raise. The binaries decide how each
/// variant is rendered; the library only classifies.
#[derive(Debug, Error)]
pub enum Error {
    /// The serialized model is missing. Recoverable at the front-end by
    /// telling the user to train first.
    #[error("model artifact not found at {}; run `stunting-train` to create it", .path.display())]
    ArtifactNotFound { path: PathBuf },

    /// Batch input lacks required fields after alias normalization.
    /// Column names are canonical and sorted.
    #[error("required columns not found: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A numeric cell could not be parsed. Blank cells are not errors;
    /// they flow through median imputation instead.
    #[error("column `{column}`, row {row}: `{value}` is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// The training dataset file does not exist.
    #[error("training dataset not found at {}", .path.display())]
    DatasetNotFound { path: PathBuf },

    /// The training dataset parsed to zero rows.
    #[error("training dataset is empty")]
    EmptyDataset,

    /// A label value outside the four recognized source categories.
    #[error("unrecognized nutritional status label `{0}`")]
    UnknownLabel(String),

    /// Structural validation of a deserialized artifact failed.
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
