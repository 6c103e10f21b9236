//! End-to-end tests: train on a synthetic dataset, then predict through
//! the public prediction entry points.

use std::fmt::Write as _;
use std::path::PathBuf;

use stunting_lib::model::{ForestOptions, Node, StuntingModel, MODEL_VERSION};
use stunting_lib::model::{DecisionTree, Preprocessor};
use stunting_lib::predictor::{
    PRED_LABEL_COLUMN, PROBA_NOT_STUNTED_COLUMN, PROBA_STUNTED_COLUMN,
};
use stunting_lib::training::{self, TrainingOptions};
use stunting_lib::{Predictor, Table, LABEL_NOT_STUNTED, LABEL_STUNTED};

/// Synthetic dataset in the source schema: short-for-age children carry
/// the two stunted labels, tall ones the two normal labels.
fn write_dataset(dir: &tempfile::TempDir) -> PathBuf {
    let mut csv = String::from("Umur (bulan),Jenis Kelamin,Tinggi Badan (cm),Status Gizi\n");
    for i in 0..60 {
        let gender = if i % 2 == 0 { "laki-laki" } else { "perempuan" };
        let (height, label) = match i % 4 {
            0 => (58.0 + (i % 9) as f64 * 0.4, "severely stunted"),
            1 => (66.0 + (i % 9) as f64 * 0.4, "stunted"),
            2 => (92.0 + (i % 9) as f64 * 0.4, "normal"),
            _ => (102.0 + (i % 9) as f64 * 0.4, "tinggi"),
        };
        let age = 12 + (i % 24);
        writeln!(csv, "{age},{gender},{height},{label}").unwrap();
    }
    let path = dir.path().join("data_balita.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn small_options() -> TrainingOptions {
    TrainingOptions {
        forest: ForestOptions {
            n_trees: 25,
            ..ForestOptions::default()
        },
        ..TrainingOptions::default()
    }
}

#[test]
fn test_train_then_predict_single() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(&dir);
    let model_path = dir.path().join("models/model.json");
    let metrics_path = dir.path().join("models/metrics.json");

    let outcome =
        training::run(&dataset, &model_path, &metrics_path, &small_options()).unwrap();
    assert!(model_path.exists());
    assert!(metrics_path.exists());
    // Separable synthetic data: the model must do far better than chance.
    assert!(outcome.metrics.accuracy > 0.8, "{}", outcome.metrics.accuracy);
    assert!(outcome.metrics.roc_auc > 0.8, "{}", outcome.metrics.roc_auc);

    let predictor = Predictor::new();
    let short = predictor
        .predict_single(12.0, "laki-laki", 60.0, &model_path)
        .unwrap();
    assert_eq!(short.label, LABEL_STUNTED);
    let tall = predictor
        .predict_single(30.0, "perempuan", 104.0, &model_path)
        .unwrap();
    assert_eq!(tall.label, LABEL_NOT_STUNTED);
    assert!((tall.proba_stunted + tall.proba_tidak_stunted - 1.0).abs() < 1e-6);
}

#[test]
fn test_metrics_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(&dir);
    let model_path = dir.path().join("model.json");
    let metrics_path = dir.path().join("metrics.json");

    let outcome =
        training::run(&dataset, &model_path, &metrics_path, &small_options()).unwrap();
    let read_back = training::read_metrics(&metrics_path).unwrap();
    assert_eq!(read_back.accuracy, outcome.metrics.accuracy);
    assert_eq!(read_back.confusion_matrix, outcome.metrics.confusion_matrix);
    assert!(read_back.train_test_split.stratify);
    assert_eq!(read_back.train_test_split.random_state, 42);
    assert!((read_back.train_test_split.test_size - 0.2).abs() < 1e-12);
    assert!(read_back
        .classification_report
        .contains_key(LABEL_STUNTED));
    assert!(read_back
        .classification_report
        .contains_key(LABEL_NOT_STUNTED));
}

#[test]
fn test_batch_upload_with_blank_height_still_scores_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(&dir);
    let model_path = dir.path().join("model.json");
    let metrics_path = dir.path().join("metrics.json");
    training::run(&dataset, &model_path, &metrics_path, &small_options()).unwrap();

    // Column named "Age (Months)" must be accepted; one blank height
    // flows through imputation instead of dropping the row.
    let upload = "Age (Months),Gender,Height (cm)\n12,laki-laki,62\n24,perempuan,\n30,male,100\n";
    let table = Table::from_reader(upload.as_bytes()).unwrap();

    let predictor = Predictor::new();
    let (output, counts) = predictor.predict_table(&table, &model_path).unwrap();

    assert_eq!(output.n_rows(), 3);
    assert_eq!(counts.values().sum::<usize>(), 3);
    let label_col = output.column_index(PRED_LABEL_COLUMN).unwrap();
    for row in 0..3 {
        let label = output.cell(row, label_col);
        assert!(label == LABEL_STUNTED || label == LABEL_NOT_STUNTED);
    }

    // The result table round-trips through the CSV output contract.
    let out_path = dir.path().join("predictions.csv");
    output.to_csv_path(&out_path).unwrap();
    let reloaded = Table::from_csv_path(&out_path).unwrap();
    assert_eq!(reloaded.n_rows(), 3);
    assert!(reloaded.column_index(PROBA_STUNTED_COLUMN).is_some());
    assert!(reloaded.column_index(PROBA_NOT_STUNTED_COLUMN).is_some());
}

/// A hand-built artifact whose every tree reports a 0.3 stunted
/// probability pins the decision rule: p=0.3 means not stunted, and the
/// probabilities surface unchanged.
#[test]
fn test_fixture_model_with_known_probability() {
    let dir = tempfile::tempdir().unwrap();
    let trees: Vec<DecisionTree> = (0..10)
        .map(|_| DecisionTree {
            root: Node::Leaf {
                distribution: [0.7, 0.3],
            },
        })
        .collect();
    let model = StuntingModel {
        model_version: MODEL_VERSION,
        classes: vec![LABEL_NOT_STUNTED.to_string(), LABEL_STUNTED.to_string()],
        trained_at: 0,
        preprocessor: Preprocessor {
            gender_categories: vec!["laki-laki".to_string(), "perempuan".to_string()],
            age_median: 24.0,
            height_median: 80.0,
        },
        trees,
    };
    let path = dir.path().join("fixture.json");
    model.save(&path).unwrap();

    let predictor = Predictor::new();
    let result = predictor
        .predict_single(12.0, "laki-laki", 75.0, &path)
        .unwrap();
    assert_eq!(result.label, LABEL_NOT_STUNTED);
    assert!((result.proba_stunted - 0.3).abs() < 1e-9);
    assert!((result.proba_tidak_stunted - 0.7).abs() < 1e-9);
}
