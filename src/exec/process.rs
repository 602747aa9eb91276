//! Process executor: runs the external binary once for a context.

use crate::cancel::CancelSignal;
use crate::error::DispatchError;
use crate::exec::{ContextExecutor, ExecutionResult, Invocation, OutputMode};
use crate::output::{LineAssembler, LinePrefixWriter};
use std::io::{self, Write};
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

const READ_CHUNK: usize = 8 * 1024;

/// How output of each process is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    pub output: OutputMode,
    /// Label lines with the context name.
    pub prefix_lines: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            output: OutputMode::Buffered,
            prefix_lines: true,
        }
    }
}

/// Runs `<binary> --context <name> [--namespace <ns>] <args...>` as a child process.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    invocation: Invocation,
    options: ExecOptions,
}

impl ProcessExecutor {
    pub fn new(invocation: Invocation, options: ExecOptions) -> Self {
        Self {
            invocation,
            options,
        }
    }

    fn command(&self, context: &str) -> Command {
        let mut cmd = Command::new(self.invocation.binary());
        cmd.args(self.invocation.args_for(context))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true);
        match self.options.output {
            OutputMode::Buffered => cmd.stderr(Stdio::piped()),
            OutputMode::Streamed => cmd.stderr(Stdio::inherit()),
        };
        cmd
    }

    fn target(&self, context: &str) -> StdoutTarget {
        match (self.options.output, self.options.prefix_lines) {
            (OutputMode::Buffered, true) => {
                StdoutTarget::Labelled(LinePrefixWriter::new(context, Vec::new()))
            }
            (OutputMode::Buffered, false) => StdoutTarget::Plain(Vec::new()),
            (OutputMode::Streamed, true) => StdoutTarget::Terminal(LineAssembler::new(context)),
            (OutputMode::Streamed, false) => StdoutTarget::Terminal(LineAssembler::unlabelled()),
        }
    }

    fn execution_error(&self, context: &str, cause: impl ToString, stderr: &[u8]) -> DispatchError {
        DispatchError::Execution {
            context: context.to_string(),
            args: self.invocation.pass_through().to_vec(),
            cause: cause.to_string(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

impl ContextExecutor for ProcessExecutor {
    async fn execute(&self, context: &str, cancel: &CancelSignal) -> ExecutionResult {
        if cancel.is_cancelled() {
            return ExecutionResult::failure(context, Vec::new(), DispatchError::Cancelled);
        }
        debug!(context, "running in context");

        let child = match self.command(context).spawn() {
            Ok(child) => child,
            Err(e) => {
                let err = self.execution_error(context, e, &[]);
                return ExecutionResult::failure(context, Vec::new(), err);
            }
        };

        // The child lives inside the drive future; dropping it on cancel kills the process.
        let outcome = tokio::select! {
            outcome = drive(child, self.target(context)) => outcome,
            _ = cancel.cancelled() => {
                warn!(context, "cancelled while running");
                return ExecutionResult::failure(context, Vec::new(), DispatchError::Cancelled);
            }
        };

        match outcome {
            Ok((status, output, stderr)) => {
                if status.success() {
                    debug!(context, bytes = output.len(), "context finished");
                    ExecutionResult::success(context, output)
                } else {
                    let err = self.execution_error(context, status, &stderr);
                    ExecutionResult::failure(context, output, err)
                }
            }
            Err(e) => {
                let err = self.execution_error(context, e, &[]);
                ExecutionResult::failure(context, Vec::new(), err)
            }
        }
    }
}

/// Pump stdout into the target and collect stderr until the child exits.
/// Returns the captured stdout, which is empty when it went to the terminal.
async fn drive(
    mut child: Child,
    mut target: StdoutTarget,
) -> io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    let pump = async {
        if let Some(out) = stdout.as_mut() {
            let mut buf = vec![0u8; READ_CHUNK];
            loop {
                let n = out.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                target.accept(&buf[..n]).await?;
            }
        }
        Ok::<_, io::Error>(())
    };
    let collect = async {
        let mut captured = Vec::new();
        if let Some(err) = stderr.as_mut() {
            err.read_to_end(&mut captured).await?;
        }
        Ok::<_, io::Error>(captured)
    };

    let ((), captured) = tokio::try_join!(pump, collect)?;
    let output = target.finish().await?;
    let status = child.wait().await?;
    Ok((status, output, captured))
}

/// Where one child's stdout goes.
#[derive(Debug)]
enum StdoutTarget {
    Labelled(LinePrefixWriter<Vec<u8>>),
    Plain(Vec<u8>),
    Terminal(LineAssembler),
}

impl StdoutTarget {
    async fn accept(&mut self, chunk: &[u8]) -> io::Result<()> {
        match self {
            StdoutTarget::Labelled(writer) => writer.write_all(chunk),
            StdoutTarget::Plain(buf) => {
                buf.extend_from_slice(chunk);
                Ok(())
            }
            StdoutTarget::Terminal(lines) => write_terminal(lines.push(chunk)).await,
        }
    }

    async fn finish(self) -> io::Result<Vec<u8>> {
        match self {
            StdoutTarget::Labelled(writer) => Ok(writer.into_inner()),
            StdoutTarget::Plain(buf) => Ok(buf),
            StdoutTarget::Terminal(lines) => {
                write_terminal(lines.finish()).await?;
                Ok(Vec::new())
            }
        }
    }
}

/// Write whole lines to stdout in one locked `write_all`, off the async workers.
async fn write_terminal(unit: Vec<u8>) -> io::Result<()> {
    if unit.is_empty() {
        return Ok(());
    }
    tokio::task::spawn_blocking(move || {
        let mut out = io::stdout().lock();
        out.write_all(&unit)?;
        out.flush()
    })
    .await
    .map_err(io::Error::other)?
}
