//! Prediction engine with a memoized model cache
//!
//! The cache is the only shared mutable state in the process: keyed by
//! artifact path, populated on first access, never re-read afterwards.
//! Loaded models are handed out as shared references and never mutated,
//! so concurrent readers are safe.

use crate::contract::{
    normalize_columns, normalize_gender, AGE_COLUMN, GENDER_COLUMN, HEIGHT_COLUMN,
    REQUIRED_COLUMNS,
};
use crate::error::{Error, Result};
use crate::model::StuntingModel;
use crate::models::{PredictionResult, Record};
use crate::table::Table;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Output column holding the predicted label.
pub const PRED_LABEL_COLUMN: &str = "pred_label";

/// Output column holding the stunted probability.
pub const PROBA_STUNTED_COLUMN: &str = "proba_stunted";

/// Output column holding the not-stunted probability.
pub const PROBA_NOT_STUNTED_COLUMN: &str = "proba_tidak_stunted";

/// Path-keyed, load-once model cache.
#[derive(Debug, Default)]
pub struct ModelCache {
    models: Mutex<HashMap<PathBuf, Arc<StuntingModel>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached model for `path`, loading it on first access.
    pub fn get(&self, path: &Path) -> Result<Arc<StuntingModel>> {
        let mut models = self.models.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = models.get(path) {
            debug!(path = %path.display(), "Model cache hit");
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(StuntingModel::load(path)?);
        info!(
            path = %path.display(),
            trees = model.trees.len(),
            "Model artifact loaded"
        );
        models.insert(path.to_path_buf(), Arc::clone(&model));
        Ok(model)
    }
}

/// Synchronous prediction front door for single records and batches.
#[derive(Debug, Default)]
pub struct Predictor {
    cache: ModelCache,
}

impl Predictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one record. Gender is normalized here; the label follows
    /// the >= 0.5 threshold on the stunted probability.
    pub fn predict_single(
        &self,
        age_months: f64,
        gender: &str,
        height_cm: f64,
        model_path: &Path,
    ) -> Result<PredictionResult> {
        let model = self.cache.get(model_path)?;
        let record = Record {
            age_months,
            gender: normalize_gender(gender).into_value(),
            height_cm,
        };
        let proba = model.predict_proba(&record);
        Ok(PredictionResult::from_probabilities(proba[1], proba[0]))
    }

    /// Score a batch table. Returns a copy of the input with the three
    /// prediction columns appended (row order preserved) and the label
    /// counts over the batch.
    pub fn predict_table(
        &self,
        table: &Table,
        model_path: &Path,
    ) -> Result<(Table, BTreeMap<String, usize>)> {
        let model = self.cache.get(model_path)?;
        let normalized = normalize_columns(table);

        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| normalized.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(Error::MissingColumns { columns: missing });
        }

        // Presence checked above.
        let age_col = normalized.column_index(AGE_COLUMN).unwrap_or_default();
        let gender_col = normalized.column_index(GENDER_COLUMN).unwrap_or_default();
        let height_col = normalized.column_index(HEIGHT_COLUMN).unwrap_or_default();

        let mut labels = Vec::with_capacity(normalized.n_rows());
        let mut stunted_probas = Vec::with_capacity(normalized.n_rows());
        let mut not_stunted_probas = Vec::with_capacity(normalized.n_rows());
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for (row_index, row) in normalized.rows().iter().enumerate() {
            let record = Record {
                age_months: parse_numeric_cell(&row[age_col], AGE_COLUMN, row_index)?,
                gender: normalize_gender(&row[gender_col]).into_value(),
                height_cm: parse_numeric_cell(&row[height_col], HEIGHT_COLUMN, row_index)?,
            };
            let proba = model.predict_proba(&record);
            let result = PredictionResult::from_probabilities(proba[1], proba[0]);

            *counts.entry(result.label.clone()).or_insert(0) += 1;
            labels.push(result.label);
            stunted_probas.push(format_probability(proba[1]));
            not_stunted_probas.push(format_probability(proba[0]));
        }

        let mut output = table.clone();
        output.push_column(PRED_LABEL_COLUMN, labels);
        output.push_column(PROBA_STUNTED_COLUMN, stunted_probas);
        output.push_column(PROBA_NOT_STUNTED_COLUMN, not_stunted_probas);

        debug!(rows = output.n_rows(), "Batch prediction complete");
        Ok((output, counts))
    }
}

/// Blank cells flow through as missing (imputed downstream); anything
/// else must parse as a number.
fn parse_numeric_cell(cell: &str, column: &str, row_index: usize) -> Result<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| Error::InvalidNumber {
        column: column.to_string(),
        row: row_index + 1,
        value: cell.to_string(),
    })
}

fn format_probability(value: f64) -> String {
    format!("{value}")
}
