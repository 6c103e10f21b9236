//! Single-record prediction command

use anyhow::Result;
use std::path::Path;
use stunting_lib::{PredictionResult, Predictor};

use crate::output::{color_label, format_probability, print_error, render_table, OutputFormat};

pub fn run(
    predictor: &Predictor,
    age: f64,
    gender: &str,
    height: f64,
    model_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let result = match predictor.predict_single(age, gender, height, model_path) {
        Ok(result) => result,
        Err(error) => {
            if super::handle_missing_artifact(&error) {
                return Ok(());
            }
            print_error(&error.to_string());
            return Err(error.into());
        }
    };

    render(&result, format)?;
    Ok(())
}

fn render(result: &PredictionResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Table => {
            let table = render_table(
                ["Label", "P(stunted)", "P(tidak stunted)"],
                vec![vec![
                    color_label(&result.label),
                    format_probability(result.proba_stunted),
                    format_probability(result.proba_tidak_stunted),
                ]],
            );
            println!("{table}");
        }
    }
    Ok(())
}
