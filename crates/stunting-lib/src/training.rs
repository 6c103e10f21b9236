//! Offline training routine: dataset loading, label collapsing,
//! stratified split, fit, evaluation and persistence
//!
//! The four source labels collapse to a binary target (1 = stunted)
//! before fitting. Training is one-shot: a single fit followed by a
//! single write of the artifact and the metrics summary.

use crate::contract::{
    normalize_columns, normalize_gender, AGE_COLUMN, GENDER_COLUMN, HEIGHT_COLUMN,
    REQUIRED_COLUMNS,
};
use crate::error::{Error, Result};
use crate::metrics::{
    accuracy, classification_report, roc_auc, ConfusionMatrix, MetricsSummary, SplitParams,
};
use crate::model::{ForestOptions, StuntingModel};
use crate::models::{Record, DECISION_THRESHOLD, LABEL_NOT_STUNTED, LABEL_STUNTED};
use crate::table::Table;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Label column of the training dataset.
pub const LABEL_COLUMN: &str = "Status Gizi";

/// Training run parameters.
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub test_size: f64,
    pub seed: u64,
    pub forest: ForestOptions,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            forest: ForestOptions::default(),
        }
    }
}

/// Result of a completed training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model_path: PathBuf,
    pub metrics_path: PathBuf,
    pub metrics: MetricsSummary,
}

/// Collapse one source label onto the binary target (1 = stunted).
pub fn collapse_label(raw: &str) -> Result<usize> {
    match raw.trim().to_lowercase().as_str() {
        "stunted" | "severely stunted" => Ok(1),
        "normal" | "tinggi" | "tidak stunted" => Ok(0),
        _ => Err(Error::UnknownLabel(raw.to_string())),
    }
}

/// Load the labeled dataset. Feature columns are resolved through the
/// same alias table as batch prediction; gender values are normalized.
pub fn load_dataset(path: &Path) -> Result<(Vec<Record>, Vec<usize>)> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let table = normalize_columns(&Table::from_csv_path(path)?);

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(std::iter::once(LABEL_COLUMN.to_string()))
        .filter(|name| table.column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(Error::MissingColumns { columns: missing });
    }

    let age_col = table.column_index(AGE_COLUMN).unwrap_or_default();
    let gender_col = table.column_index(GENDER_COLUMN).unwrap_or_default();
    let height_col = table.column_index(HEIGHT_COLUMN).unwrap_or_default();
    let label_col = table.column_index(LABEL_COLUMN).unwrap_or_default();

    let mut records = Vec::with_capacity(table.n_rows());
    let mut targets = Vec::with_capacity(table.n_rows());
    for (row_index, row) in table.rows().iter().enumerate() {
        records.push(Record {
            age_months: parse_training_cell(&row[age_col], AGE_COLUMN, row_index)?,
            gender: normalize_gender(&row[gender_col]).into_value(),
            height_cm: parse_training_cell(&row[height_col], HEIGHT_COLUMN, row_index)?,
        });
        targets.push(collapse_label(&row[label_col])?);
    }
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok((records, targets))
}

fn parse_training_cell(cell: &str, column: &str, row_index: usize) -> Result<f64> {
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

/// Shuffle indices within each class and carve off `test_size` of each,
/// so the split preserves class proportions. Deterministic per seed.
pub fn stratified_split(targets: &[usize], test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in [0usize, 1] {
        let mut class_indices: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == class)
            .map(|(i, _)| i)
            .collect();
        class_indices.shuffle(&mut rng);
        let n_test = (class_indices.len() as f64 * test_size).round() as usize;
        test.extend_from_slice(&class_indices[..n_test]);
        train.extend_from_slice(&class_indices[n_test..]);
    }
    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}

/// Run one complete training pass: fit on the train split, evaluate on
/// the held-out split, persist artifact and metrics.
pub fn run(
    dataset_path: &Path,
    model_path: &Path,
    metrics_path: &Path,
    options: &TrainingOptions,
) -> Result<TrainingOutcome> {
    let (records, targets) = load_dataset(dataset_path)?;
    info!(
        rows = records.len(),
        counts = ?label_counts(&targets),
        "Training dataset loaded"
    );

    let (train_idx, test_idx) = stratified_split(&targets, options.test_size, options.seed);
    info!(
        train_rows = train_idx.len(),
        test_rows = test_idx.len(),
        "Stratified split complete"
    );

    let train_records: Vec<Record> = train_idx.iter().map(|&i| records[i].clone()).collect();
    let train_targets: Vec<usize> = train_idx.iter().map(|&i| targets[i]).collect();
    let model = StuntingModel::fit(&train_records, &train_targets, &options.forest)?;

    let mut cm = ConfusionMatrix::new();
    let mut scores = Vec::with_capacity(test_idx.len());
    let mut test_targets = Vec::with_capacity(test_idx.len());
    for &i in &test_idx {
        let proba_stunted = model.predict_proba(&records[i])[1];
        let predicted = usize::from(proba_stunted >= DECISION_THRESHOLD);
        cm.add(targets[i], predicted);
        scores.push(proba_stunted);
        test_targets.push(targets[i]);
    }

    let class_names = vec![LABEL_NOT_STUNTED.to_string(), LABEL_STUNTED.to_string()];
    let metrics = MetricsSummary {
        accuracy: accuracy(&cm),
        roc_auc: roc_auc(&scores, &test_targets),
        confusion_matrix: cm.as_array(),
        classification_report: classification_report(&cm, &class_names),
        train_test_split: SplitParams {
            test_size: options.test_size,
            random_state: options.seed,
            stratify: true,
        },
        notes: format!(
            "Label: 1={LABEL_STUNTED}, 0={LABEL_NOT_STUNTED}. \
             Pipeline: one-hot gender + median impute + random forest."
        ),
    };

    model.save(model_path)?;
    write_metrics(metrics_path, &metrics)?;
    info!(
        accuracy = metrics.accuracy,
        roc_auc = metrics.roc_auc,
        "Training run complete"
    );

    Ok(TrainingOutcome {
        model_path: model_path.to_path_buf(),
        metrics_path: metrics_path.to_path_buf(),
        metrics,
    })
}

fn write_metrics(path: &Path, metrics: &MetricsSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(metrics)?)?;
    Ok(())
}

/// Read a metrics summary back; used by the front-end metrics panel.
pub fn read_metrics(path: &Path) -> Result<MetricsSummary> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Count rows per collapsed label, for logging and sanity checks.
pub fn label_counts(targets: &[usize]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for &t in targets {
        let name = if t == 1 { LABEL_STUNTED } else { LABEL_NOT_STUNTED };
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_label_variants() {
        assert_eq!(collapse_label("stunted").unwrap(), 1);
        assert_eq!(collapse_label(" Severely Stunted ").unwrap(), 1);
        assert_eq!(collapse_label("normal").unwrap(), 0);
        assert_eq!(collapse_label("TINGGI").unwrap(), 0);
        assert!(matches!(
            collapse_label("obese"),
            Err(Error::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_stratified_split_preserves_proportions() {
        // 80 negatives, 20 positives.
        let targets: Vec<usize> = (0..100).map(|i| usize::from(i >= 80)).collect();
        let (train, test) = stratified_split(&targets, 0.2, 42);
        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(test.len(), 20);
        let test_pos = test.iter().filter(|&&i| targets[i] == 1).count();
        assert_eq!(test_pos, 4);
        // Disjoint.
        for i in &test {
            assert!(!train.contains(i));
        }
    }

    #[test]
    fn test_stratified_split_is_deterministic() {
        let targets: Vec<usize> = (0..50).map(|i| i % 2).collect();
        assert_eq!(
            stratified_split(&targets, 0.2, 42),
            stratified_split(&targets, 0.2, 42)
        );
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { .. }));
    }

    #[test]
    fn test_load_dataset_requires_label_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Umur (bulan),Jenis Kelamin,Tinggi Badan (cm)\n12,laki-laki,70\n")
            .unwrap();
        let err = load_dataset(&path).unwrap_err();
        match err {
            Error::MissingColumns { columns } => {
                assert_eq!(columns, vec![LABEL_COLUMN.to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dataset_accepts_aliases_and_normalizes_gender() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(
            &path,
            "age (months),SEX,tinggi,Status Gizi\n12,male,70.5,stunted\n30,P,95,normal\n",
        )
        .unwrap();
        let (records, targets) = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].gender, "laki-laki");
        assert_eq!(records[1].gender, "perempuan");
        assert_eq!(targets, vec![1, 0]);
    }

    #[test]
    fn test_label_counts() {
        let counts = label_counts(&[1, 0, 1, 1]);
        assert_eq!(counts[LABEL_STUNTED], 3);
        assert_eq!(counts[LABEL_NOT_STUNTED], 1);
    }
}
