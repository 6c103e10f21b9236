//! CLI command implementations

pub mod batch;
pub mod metrics;
pub mod predict;

use crate::output::{print_info, print_warning};
use stunting_lib::Error;

/// Render a missing-artifact error as a non-fatal warning with
/// remediation guidance. Returns true when the error was handled.
pub fn handle_missing_artifact(error: &Error) -> bool {
    if matches!(error, Error::ArtifactNotFound { .. }) {
        print_warning(&error.to_string());
        print_info("Run `stunting-train` to create the model, then try again.");
        true
    } else {
        false
    }
}
