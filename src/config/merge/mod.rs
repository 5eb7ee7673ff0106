//! Settings composition.

pub mod service;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the defaults every layer overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("secret_store.timeout_ms", 5000_i64)?
        .set_default("probe.max_attempts", 1000_i64)?
        .set_default("probe.interval_ms", 100_i64)?
        .set_default("probe.connect_timeout_ms", 100_i64)
}
