//! CLI integration tests

use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-p", "stunting-cli", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("stunting classifier"),
        "Should show app description"
    );
    assert!(stdout.contains("predict"), "Should show predict command");
    assert!(stdout.contains("batch"), "Should show batch command");
    assert!(stdout.contains("metrics"), "Should show metrics command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = run_cli(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("stunting"), "Should show binary name");
}

/// Test predict subcommand help
#[test]
fn test_predict_help() {
    let output = run_cli(&["predict", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Predict help should succeed");
    assert!(stdout.contains("--age"), "Should show age option");
    assert!(stdout.contains("--gender"), "Should show gender option");
    assert!(stdout.contains("--height"), "Should show height option");
    assert!(stdout.contains("--model"), "Should show model option");
    assert!(
        stdout.contains("STUNTING_MODEL_PATH"),
        "Should show model env var"
    );
}

/// Test batch subcommand help
#[test]
fn test_batch_help() {
    let output = run_cli(&["batch", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Batch help should succeed");
    assert!(stdout.contains("--output"), "Should show output option");
    assert!(stdout.contains("--preview"), "Should show preview option");
}

/// Test metrics subcommand help
#[test]
fn test_metrics_help() {
    let output = run_cli(&["metrics", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Metrics help should succeed");
    assert!(stdout.contains("--path"), "Should show path option");
}

/// Test format option
#[test]
fn test_format_option() {
    let output = run_cli(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// A missing model artifact must be rendered as remediation guidance,
/// not an unhandled error
#[test]
fn test_predict_with_missing_model_warns() {
    let output = run_cli(&[
        "predict",
        "--age",
        "12",
        "--gender",
        "laki-laki",
        "--height",
        "75",
        "--model",
        "/nonexistent/model.json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "Missing model should be a non-fatal warning"
    );
    assert!(
        stdout.contains("stunting-train"),
        "Should point at the training entry point"
    );
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = run_cli(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing required argument error handling
#[test]
fn test_missing_argument() {
    let output = run_cli(&["predict", "--age", "12"]);
    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing argument"
    );
}
