//! Environment source: `MKUBECTL_BINARY`, `MKUBECTL_DISPATCH__MODE`, `MKUBECTL_LOGGING__LEVEL`, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "MKUBECTL";

/// Add the environment source; nested keys are separated by `__`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    ))
}
