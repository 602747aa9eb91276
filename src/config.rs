//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, `MKUBECTL_*`
//! environment variables, and finally command-line flags applied by the CLI.

use crate::dispatch::DispatchMode;
use crate::error::DispatchError;
use crate::exec::{ExecOptions, OutputMode};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MkubectlConfig {
    /// Binary used for both discovery and execution
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Arguments that make `binary` print one context name per line
    #[serde(default = "default_discovery_args")]
    pub discovery_args: Vec<String>,

    /// Scheduling and output handling
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scheduling and output settings for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub mode: DispatchMode,

    #[serde(default)]
    pub output: OutputMode,

    /// Label every line after the first with the context name
    #[serde(default = "default_true")]
    pub prefix_lines: bool,
}

fn default_binary() -> String {
    "kubectl".to_string()
}

fn default_discovery_args() -> Vec<String> {
    ["config", "get-contexts", "-o", "name"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            output: OutputMode::default(),
            prefix_lines: default_true(),
        }
    }
}

impl DispatchConfig {
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            output: self.output,
            prefix_lines: self.prefix_lines,
        }
    }
}

impl Default for MkubectlConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            discovery_args: default_discovery_args(),
            dispatch: DispatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MkubectlConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), DispatchError> {
        let mut errors = Vec::new();

        if self.binary.trim().is_empty() {
            errors.push("binary cannot be empty".to_string());
        }
        if self.discovery_args.is_empty() {
            errors.push("discovery_args cannot be empty".to_string());
        }
        if let Err(e) = crate::logging::parse_level(&self.logging.level) {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}
