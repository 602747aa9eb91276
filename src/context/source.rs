//! Context sources: where the list of available context names comes from.

use crate::cancel::CancelSignal;
use crate::error::DispatchError;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Produces the raw, newline-separated context listing.
#[allow(async_fn_in_trait)]
pub trait ContextSource: Send + Sync {
    async fn list_contexts(&self, cancel: &CancelSignal) -> Result<String, DispatchError>;
}

/// Lists contexts by running an external command, `kubectl config get-contexts -o name` by default.
#[derive(Debug, Clone)]
pub struct CommandSource {
    binary: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
        }
    }

    fn describe(&self) -> String {
        std::iter::once(self.binary.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failure(&self, cause: impl ToString, stderr: &[u8]) -> DispatchError {
        DispatchError::Discovery {
            command: self.describe(),
            cause: cause.to_string(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

impl ContextSource for CommandSource {
    async fn list_contexts(&self, cancel: &CancelSignal) -> Result<String, DispatchError> {
        if cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        debug!(command = %self.describe(), "listing contexts");

        let child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(e, &[]))?;

        // Dropping the pending future drops the child, which kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => output.map_err(|e| self.failure(e, &[]))?,
            _ = cancel.cancelled() => return Err(DispatchError::Cancelled),
        };

        if !output.status.success() {
            return Err(self.failure(output.status, &output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
