//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::provider::{ConfigProvider, EnvironmentProvider, LayeredProvider, MapProvider};
use super::sources::file;
use super::BusSettings;
use crate::error::BusError;
use std::path::Path;
use std::sync::Arc;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<BusSettings, BusError> {
        Ok(MergeService::load(path)?)
    }

    /// Build the value provider: process environment over the file's `[values]` table.
    pub fn provider(path: Option<&Path>) -> Result<Arc<dyn ConfigProvider>, BusError> {
        let layered = LayeredProvider::new().push(Arc::new(EnvironmentProvider));
        let layered = match path {
            Some(path) => layered.push(Arc::new(MapProvider::from(file::read_values(path)?))),
            None => layered,
        };
        Ok(Arc::new(layered))
    }
}
