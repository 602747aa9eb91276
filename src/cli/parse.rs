//! CLI parse: clap types for mkubectl. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// mkubectl - run kubectl command in multiple contexts
#[derive(Parser, Debug)]
#[command(name = "mkubectl")]
#[command(about = "Run a kubectl command in every context matching a pattern")]
pub struct Cli {
    /// Regular expression selecting kubectl contexts (empty selects all)
    #[arg(short = 'c', long = "context", default_value = "")]
    pub context: String,

    /// kubectl namespace passed to every invocation
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Log level (trace, debug, info, warn, error, off) [default: info]
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Binary used for discovery and execution [default: kubectl]
    #[arg(long)]
    pub binary: Option<String>,

    /// Run contexts one at a time and stop at the first failure
    #[arg(long)]
    pub sequential: bool,

    /// Stream output as it arrives instead of buffering per context
    #[arg(long)]
    pub stream: bool,

    /// Do not label output lines with the context name
    #[arg(long)]
    pub no_prefix: bool,

    /// kubectl command and arguments, forwarded verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
