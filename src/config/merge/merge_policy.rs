//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("binary", "kubectl")?
        .set_default("discovery_args", vec!["config", "get-contexts", "-o", "name"])?
        .set_default("dispatch.mode", "concurrent")?
        .set_default("dispatch.output", "buffered")?
        .set_default("dispatch.prefix_lines", true)?
        .set_default("logging.level", "info")
}
