//! Dispatch: fan one invocation out over the selected contexts.
//!
//! [`Dispatcher`] owns the concurrency policy; [`run::run_fanout`] is the single
//! entry point that discovers, matches and dispatches.

pub mod dispatcher;
pub mod run;

pub use dispatcher::{DispatchMode, Dispatcher, RunSummary};
pub use run::run_fanout;
