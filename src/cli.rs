//! CLI domain: parse, route, and output only.
//! No dispatch orchestration; the route hands off to `dispatch::run_fanout`.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::RunContext;
