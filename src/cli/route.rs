//! CLI route: run context built from config plus flags. Hands the run to `run_fanout`.

use crate::cancel::CancelSignal;
use crate::config::MkubectlConfig;
use crate::context::CommandSource;
use crate::dispatch::{run_fanout, DispatchMode, Dispatcher, RunSummary};
use crate::error::DispatchError;
use crate::exec::{Invocation, OutputMode, ProcessExecutor};
use std::io::Write;
use tracing::info_span;

use crate::cli::parse::Cli;

/// Runtime context for one CLI invocation: resolved configuration and the request.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: MkubectlConfig,
    pattern: String,
    namespace: Option<String>,
    args: Vec<String>,
}

impl RunContext {
    /// Fold command-line flags over the loaded configuration.
    pub fn new(mut config: MkubectlConfig, cli: &Cli) -> Self {
        if let Some(binary) = &cli.binary {
            config.binary = binary.clone();
        }
        if cli.sequential {
            config.dispatch.mode = DispatchMode::Sequential;
        }
        if cli.stream {
            config.dispatch.output = OutputMode::Streamed;
        }
        if cli.no_prefix {
            config.dispatch.prefix_lines = false;
        }
        Self {
            config,
            pattern: cli.context.clone(),
            namespace: cli.namespace.clone(),
            args: cli.args.clone(),
        }
    }

    pub fn config(&self) -> &MkubectlConfig {
        &self.config
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new(self.config.binary.clone(), self.args.clone())
            .with_namespace(self.namespace.clone())
    }

    /// Discover, match and dispatch, writing command output to `out`.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        cancel: &CancelSignal,
    ) -> Result<RunSummary, DispatchError> {
        let source = CommandSource::new(
            self.config.binary.clone(),
            self.config.discovery_args.clone(),
        );
        let executor = ProcessExecutor::new(self.invocation(), self.config.dispatch.exec_options());
        let span = info_span!(
            "dispatch",
            mode = ?self.config.dispatch.mode,
            pattern = %self.pattern,
            command = %self.args.join(" ")
        );
        let dispatcher = Dispatcher::with_span(executor, self.config.dispatch.mode, span);
        run_fanout(&source, &self.pattern, &dispatcher, out, cancel).await
    }
}
