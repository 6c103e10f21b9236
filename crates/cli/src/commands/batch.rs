//! Batch CSV prediction command: preview, predict, summarize, write

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use stunting_lib::{Predictor, Table};

use crate::output::{print_error, print_info, print_success, render_table, OutputFormat};

pub fn run(
    predictor: &Predictor,
    input: &Path,
    output: &Path,
    model_path: &Path,
    preview_rows: usize,
    format: OutputFormat,
) -> Result<()> {
    let table = Table::from_csv_path(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    if matches!(format, OutputFormat::Table) {
        print_info(&format!(
            "Upload: {} rows, {} columns",
            table.n_rows(),
            table.headers().len()
        ));
        print_preview(&table, preview_rows);
    }

    let (result, counts) = match predictor.predict_table(&table, model_path) {
        Ok(pair) => pair,
        Err(error) => {
            if super::handle_missing_artifact(&error) {
                return Ok(());
            }
            print_error(&error.to_string());
            return Err(error.into());
        }
    };

    result
        .to_csv_path(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        OutputFormat::Table => {
            print_summary(&counts);
            print_preview(&result, preview_rows);
            print_success(&format!(
                "Predictions for {} rows written to {}",
                result.n_rows(),
                output.display()
            ));
        }
    }

    Ok(())
}

fn print_summary(counts: &BTreeMap<String, usize>) {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(label, count)| vec![label.clone(), count.to_string()])
        .collect();
    println!("{}", render_table(["Label", "Rows"], rows));
}

fn print_preview(table: &Table, preview_rows: usize) {
    let headers: Vec<&str> = table.headers().iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(preview_rows)
        .cloned()
        .collect();
    println!("{}", render_table(headers, rows));
    if table.n_rows() > preview_rows {
        print_info(&format!(
            "... {} more rows not shown",
            table.n_rows() - preview_rows
        ));
    }
}
