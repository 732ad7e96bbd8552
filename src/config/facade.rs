//! Config loading facade: the single entry point for building a `StratusConfig`.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file};
use super::StratusConfig;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, the global config file, and the environment.
    pub fn load() -> Result<StratusConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);
        let config: StratusConfig = builder.build()?.try_deserialize()?;
        debug!("Configuration loaded from default sources");
        Ok(config)
    }

    /// Load configuration from an explicit file instead of the global one.
    /// Environment variables still override file values.
    pub fn load_from_file(path: &Path) -> Result<StratusConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_explicit_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder);
        let config: StratusConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the default sources.
    pub fn load_with(path: Option<&Path>) -> Result<StratusConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
