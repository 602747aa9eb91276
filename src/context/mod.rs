//! Context discovery and selection.
//!
//! The source lists every context the execution binary knows about; the matcher
//! keeps the ones selected by the user's pattern, in discovery order.

pub mod matcher;
pub mod source;

pub use matcher::ContextMatcher;
pub use source::{CommandSource, ContextSource};
