//! Single fan-out entry point: compile, discover, match, dispatch.
//! The CLI and tests use this only; no discovery or dispatch orchestration in adapters.

use crate::cancel::CancelSignal;
use crate::context::{ContextMatcher, ContextSource};
use crate::dispatch::{Dispatcher, RunSummary};
use crate::error::DispatchError;
use crate::exec::ContextExecutor;
use std::io::Write;
use tracing::{info, warn};

/// Select contexts with `pattern` from `source` and run the dispatcher over them.
///
/// The pattern is compiled before discovery runs, so an invalid pattern never
/// spawns anything.
pub async fn run_fanout<S, E, W>(
    source: &S,
    pattern: &str,
    dispatcher: &Dispatcher<E>,
    out: &mut W,
    cancel: &CancelSignal,
) -> Result<RunSummary, DispatchError>
where
    S: ContextSource,
    E: ContextExecutor,
    W: Write,
{
    let matcher = ContextMatcher::new(pattern)?;
    let listing = source.list_contexts(cancel).await?;
    let contexts = matcher.filter(&listing);

    if contexts.is_empty() {
        warn!(pattern, "no contexts matched");
    } else {
        info!(pattern, matched = ?contexts, "contexts selected");
    }

    dispatcher.run(&contexts, out, cancel).await
}
