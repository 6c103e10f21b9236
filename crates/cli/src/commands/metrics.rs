//! Metrics panel command

use anyhow::Result;
use std::path::Path;
use stunting_lib::metrics::MetricsSummary;
use stunting_lib::training::read_metrics;

use crate::output::{print_info, render_table, OutputFormat};

pub fn run(path: &Path, format: OutputFormat) -> Result<()> {
    // Missing metrics are non-fatal: the panel is simply omitted.
    if !path.exists() {
        print_info(&format!(
            "No metrics summary at {}; train a model to produce one.",
            path.display()
        ));
        return Ok(());
    }

    let metrics = read_metrics(path)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        OutputFormat::Table => render(&metrics),
    }
    Ok(())
}

fn render(metrics: &MetricsSummary) {
    println!(
        "{}",
        render_table(
            ["Accuracy", "ROC-AUC", "Test size", "Seed"],
            vec![vec![
                format!("{:.6}", metrics.accuracy),
                format!("{:.6}", metrics.roc_auc),
                format!("{}", metrics.train_test_split.test_size),
                format!("{}", metrics.train_test_split.random_state),
            ]],
        )
    );

    let class_rows: Vec<Vec<String>> = metrics
        .classification_report
        .iter()
        .map(|(class, report)| {
            vec![
                class.clone(),
                format!("{:.3}", report.precision),
                format!("{:.3}", report.recall),
                format!("{:.3}", report.f1_score),
                report.support.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        render_table(
            ["Class", "Precision", "Recall", "F1", "Support"],
            class_rows,
        )
    );

    let cm = metrics.confusion_matrix;
    println!(
        "{}",
        render_table(
            ["", "pred: tidak stunted", "pred: stunted"],
            vec![
                vec![
                    "true: tidak stunted".to_string(),
                    cm[0][0].to_string(),
                    cm[0][1].to_string(),
                ],
                vec![
                    "true: stunted".to_string(),
                    cm[1][0].to_string(),
                    cm[1][1].to_string(),
                ],
            ],
        )
    );

    if !metrics.notes.is_empty() {
        print_info(&metrics.notes);
    }
}
