//! Per-context execution: one external process per context.

pub mod invocation;
pub mod process;

use crate::cancel::CancelSignal;
use crate::error::DispatchError;
use serde::{Deserialize, Serialize};

pub use invocation::Invocation;
pub use process::{ExecOptions, ProcessExecutor};

/// Where a context's standard output goes while its process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Capture stdout and stderr; the dispatcher writes stdout once the context finishes.
    #[default]
    Buffered,
    /// Write stdout straight to this process's stdout and inherit stderr.
    Streamed,
}

/// Outcome of running one context.
#[derive(Debug)]
pub struct ExecutionResult {
    pub context: String,
    /// Captured stdout after labelling; empty when streamed.
    pub output: Vec<u8>,
    pub error: Option<DispatchError>,
}

impl ExecutionResult {
    pub fn success(context: &str, output: Vec<u8>) -> Self {
        Self {
            context: context.to_string(),
            output,
            error: None,
        }
    }

    pub fn failure(context: &str, output: Vec<u8>, error: DispatchError) -> Self {
        Self {
            context: context.to_string(),
            output,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs the shared invocation against a single context.
#[allow(async_fn_in_trait)]
pub trait ContextExecutor: Send + Sync {
    async fn execute(&self, context: &str, cancel: &CancelSignal) -> ExecutionResult;
}
