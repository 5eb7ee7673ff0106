//! Environment variable source: BUSCONF__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix shared by every settings override.
pub const PREFIX: &str = "BUSCONF";

/// Add environment variable overlay to builder.
/// `BUSCONF__PROBE__MAX_ATTEMPTS=5` sets `probe.max_attempts`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
