//! Config loader: assembles sources in precedence order and validates the result.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file};
use crate::config::MkubectlConfig;
use crate::error::DispatchError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`MkubectlConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then `MKUBECTL_*` environment.
    pub fn load() -> Result<MkubectlConfig, DispatchError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        let config: MkubectlConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(binary = %config.binary, mode = ?config.dispatch.mode, "configuration loaded");
        Ok(config)
    }

    /// Defaults, then `path` (which must exist). The global file is not consulted.
    pub fn load_from_file(path: &Path) -> Result<MkubectlConfig, DispatchError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let config: MkubectlConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded from file");
        Ok(config)
    }

    /// `load_from_file` when a path is given, `load` otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<MkubectlConfig, DispatchError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
