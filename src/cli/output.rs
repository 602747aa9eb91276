//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::DispatchError;

/// Map dispatch errors to a string for CLI output.
pub fn map_error(e: &DispatchError) -> String {
    match e {
        DispatchError::Cancelled => "mkubectl: interrupted".to_string(),
        other => format!("mkubectl: {}", other),
    }
}
