//! mkubectl: one command, many clusters.
//!
//! Selects kubectl contexts by regular expression, runs the same command in
//! each of them (concurrently by default), and writes every context's output
//! with the context name after each newline so merged output stays attributable.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod output;
