//! Configuration
//!
//! Two layers feed endpoint resolution:
//!
//! - [`BusSettings`]: tool settings (logging, secret store, probe budget) merged by
//!   the `config` crate from defaults, an optional TOML file, and `BUSCONF__*`
//!   environment variables.
//! - [`ConfigProvider`]: the process-wide values (`AppName`, `PubTopics`,
//!   `<topic>_cfg`, ...) read at resolution time. The process environment wins
//!   over the `[values]` table of the settings file.

pub mod facade;
pub mod merge;
pub mod provider;
pub mod sources;

pub use facade::ConfigLoader;
pub use provider::{
    keys, resolve_mode, ConfigProvider, EnvironmentProvider, LayeredProvider, MapProvider,
};

use crate::logging::LoggingConfig;
use crate::probe::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusSettings {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub secret_store: SecretStoreSettings,

    #[serde(default)]
    pub probe: ProbeSettings,
}

/// Remote secret store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretStoreSettings {
    /// Base URL of the store; `None` means no remote store is configured
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-lookup timeout in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,

    /// Bearer token sent with every lookup
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_lookup_timeout_ms() -> u64 {
    5000
}

impl Default for SecretStoreSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_lookup_timeout_ms(),
            auth_token: None,
        }
    }
}

/// Port readiness probe budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Overall wall-clock bound; `None` leaves only the attempt budget
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

fn default_max_attempts() -> u32 {
    1000
}

fn default_interval_ms() -> u64 {
    100
}

fn default_connect_timeout_ms() -> u64 {
    100
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            deadline_ms: None,
        }
    }
}

impl ProbeSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}
