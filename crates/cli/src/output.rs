//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use stunting_lib::LABEL_STUNTED;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Render rows with arbitrary headers as a rounded table
pub fn render_table<'a>(
    headers: impl IntoIterator<Item = &'a str>,
    rows: impl IntoIterator<Item = Vec<String>>,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers);
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Format a probability with six decimals
pub fn format_probability(probability: f64) -> String {
    format!("{:.6}", probability)
}

/// Color a prediction label: stunted red, anything else green
pub fn color_label(label: &str) -> String {
    if label == LABEL_STUNTED {
        label.red().bold().to_string()
    } else {
        label.green().to_string()
    }
}
