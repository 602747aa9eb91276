//! Error types for mkubectl.

use thiserror::Error;

/// Everything that can stop a fan-out run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to compile context pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to list contexts with '{command}': {cause}{}", stderr_suffix(.stderr))]
    Discovery {
        command: String,
        cause: String,
        stderr: String,
    },

    /// One context's command could not be spawned or exited non-zero.
    #[error("{context}: failed to run: '{}' error: {cause}{}", .args.join(" "), stderr_suffix(.stderr))]
    Execution {
        context: String,
        args: Vec<String>,
        cause: String,
        stderr: String,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Context name for execution failures.
    pub fn context(&self) -> Option<&str> {
        match self {
            DispatchError::Execution { context, .. } => Some(context),
            _ => None,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" stderr: {}", trimmed)
    }
}

impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::Config(err.to_string())
    }
}
