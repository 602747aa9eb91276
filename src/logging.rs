//! Logging System
//!
//! Structured logging using the `tracing` crate. Diagnostics go to stderr (or a
//! file) so stdout carries only command output. The subscriber is installed once
//! at startup; nothing changes the level afterwards.

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full `EnvFilter` directive; wins over the configured level.
pub const LOG_ENV: &str = "MKUBECTL_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format on stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Parse a log level name. Unknown names are a configuration error.
pub fn parse_level(level: &str) -> Result<LevelFilter, DispatchError> {
    LevelFilter::from_str(level.trim()).map_err(|_| {
        DispatchError::Config(format!(
            "Invalid log level: {} (must be one of trace, debug, info, warn, error, off)",
            level
        ))
    })
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. `MKUBECTL_LOG` environment filter
/// 2. Configured level (CLI flag already folded in)
/// 3. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), DispatchError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = parse_output(&config.output)?;

    let (writer, use_color) = match output {
        LogOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), config.color),
        LogOutput::File => {
            let path = config.file.clone().ok_or_else(|| {
                DispatchError::Config("Log output 'file' requires a log file path".to_string())
            })?;
            (BoxMakeWriter::new(Mutex::new(open_log_file(&path)?)), false)
        }
    };

    let base_subscriber = Registry::default().with(filter);
    let installed = if format == LogFormat::Json {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    installed.map_err(|e| DispatchError::Config(format!("Failed to install logger: {}", e)))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, DispatchError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DispatchError::Config(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DispatchError::Config(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build environment filter from `MKUBECTL_LOG` or the configured level
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, DispatchError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    let level = parse_level(&config.level)?;
    Ok(EnvFilter::new(level.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn determine_format(config: &LoggingConfig) -> Result<LogFormat, DispatchError> {
    match config.format.as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(DispatchError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stderr,
    File,
}

fn parse_output(output: &str) -> Result<LogOutput, DispatchError> {
    match output {
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        _ => Err(DispatchError::Config(format!(
            "Invalid log output: {} (must be 'stderr' or 'file')",
            output
        ))),
    }
}
