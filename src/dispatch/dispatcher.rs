//! Dispatcher: runs an executor over every selected context under a concurrency policy.

use crate::cancel::CancelSignal;
use crate::error::DispatchError;
use crate::exec::{ContextExecutor, ExecutionResult};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info, info_span, warn, Instrument, Span};

/// How contexts are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One at a time in discovery order; stop at the first failure.
    Sequential,
    /// All at once; every context runs to completion, output replayed in discovery order.
    #[default]
    Concurrent,
}

/// Successful run: every attempted context, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub contexts: Vec<String>,
}

/// Drives a [`ContextExecutor`] across contexts.
///
/// Diagnostics are emitted inside the dispatcher's own span, created once here
/// rather than taken from global state.
pub struct Dispatcher<E: ContextExecutor> {
    executor: E,
    mode: DispatchMode,
    span: Span,
}

impl<E: ContextExecutor> Dispatcher<E> {
    pub fn new(executor: E, mode: DispatchMode) -> Self {
        let span = info_span!("dispatch", mode = ?mode);
        Self {
            executor,
            mode,
            span,
        }
    }

    pub fn with_span(executor: E, mode: DispatchMode, span: Span) -> Self {
        Self {
            executor,
            mode,
            span,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run every context and write its output to `out`.
    ///
    /// Returns the first failure under the active policy. A signal that has
    /// already fired stops the run before any context starts.
    pub async fn run<W: Write>(
        &self,
        contexts: &[String],
        out: &mut W,
        cancel: &CancelSignal,
    ) -> Result<RunSummary, DispatchError> {
        async {
            if cancel.is_cancelled() {
                warn!("cancelled before any context started");
                return Err(DispatchError::Cancelled);
            }
            info!(contexts = contexts.len(), "dispatching");
            match self.mode {
                DispatchMode::Sequential => self.run_sequential(contexts, out, cancel).await,
                DispatchMode::Concurrent => self.run_concurrent(contexts, out, cancel).await,
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Run all contexts at once and return their results in discovery order.
    pub async fn execute_all(
        &self,
        contexts: &[String],
        cancel: &CancelSignal,
    ) -> Vec<ExecutionResult> {
        join_all(
            contexts
                .iter()
                .map(|context| self.executor.execute(context, cancel)),
        )
        .await
    }

    async fn run_sequential<W: Write>(
        &self,
        contexts: &[String],
        out: &mut W,
        cancel: &CancelSignal,
    ) -> Result<RunSummary, DispatchError> {
        for (index, context) in contexts.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(DispatchError::Cancelled);
            }
            let result = self.executor.execute(context, cancel).await;
            out.write_all(&result.output)?;
            out.flush()?;
            if let Some(err) = result.error {
                warn!(
                    context = %result.context,
                    skipped = contexts.len() - index - 1,
                    error = %err,
                    "context failed, stopping"
                );
                return Err(err);
            }
        }
        Ok(RunSummary {
            contexts: contexts.to_vec(),
        })
    }

    async fn run_concurrent<W: Write>(
        &self,
        contexts: &[String],
        out: &mut W,
        cancel: &CancelSignal,
    ) -> Result<RunSummary, DispatchError> {
        let results = self.execute_all(contexts, cancel).await;

        let mut first_error = None;
        for result in results {
            out.write_all(&result.output)?;
            if let Some(err) = result.error {
                warn!(context = %result.context, error = %err, "context failed");
                if first_error.is_none() {
                    first_error = Some(err);
                } else {
                    debug!(context = %result.context, "later failure not reported");
                }
            }
        }
        out.flush()?;

        match first_error {
            Some(err) => Err(err),
            None => Ok(RunSummary {
                contexts: contexts.to_vec(),
            }),
        }
    }
}
