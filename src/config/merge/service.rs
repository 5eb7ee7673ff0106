//! MergeService: orchestrates sources, applies defaults, deserializes to BusSettings.

use super::builder_with_defaults;
use crate::config::sources::{environment, file};
use crate::config::BusSettings;
use config::ConfigError;
use std::path::Path;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Load settings from defaults, an optional file, and the environment.
    /// Precedence: defaults (lowest) -> settings file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<BusSettings, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = match path {
            Some(path) => file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
