//! Process-wide value providers.

use crate::error::BusError;
use crate::types::Mode;
use std::collections::HashMap;
use std::sync::Arc;

/// Well-known value names.
pub mod keys {
    /// Identity of the local application
    pub const APP_NAME: &str = "AppName";
    /// Comma-separated publish topics
    pub const PUB_TOPICS: &str = "PubTopics";
    /// Comma-separated subscribe topics, each written `<publisher>/<topic>`
    pub const SUB_TOPICS: &str = "SubTopics";
    /// Comma-separated subscriber identities allowed on every publish topic
    pub const CLIENTS: &str = "Clients";
    /// `true` selects development mode
    pub const DEV_MODE: &str = "DevMode";

    /// Name of the value holding `<transportKind>,<address>` for a topic.
    pub fn topic_config(topic: &str) -> String {
        format!("{}_cfg", topic)
    }
}

/// Read-only source of process-wide configuration values.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn require(&self, key: &str) -> Result<String, BusError> {
        self.get(key).ok_or_else(|| BusError::missing(key))
    }
}

/// Reads values from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentProvider;

impl ConfigProvider for EnvironmentProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory values.
#[derive(Debug, Clone, Default)]
pub struct MapProvider {
    values: HashMap<String, String>,
}

impl MapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl From<HashMap<String, String>> for MapProvider {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl ConfigProvider for MapProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered stack of providers; the first layer holding a key wins.
#[derive(Clone, Default)]
pub struct LayeredProvider {
    layers: Vec<Arc<dyn ConfigProvider>>,
}

impl LayeredProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower priority than every existing layer.
    pub fn push(mut self, layer: Arc<dyn ConfigProvider>) -> Self {
        self.layers.push(layer);
        self
    }
}

impl ConfigProvider for LayeredProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

/// Resolve the deployment mode from `DevMode`, defaulting to production.
pub fn resolve_mode(provider: &dyn ConfigProvider) -> Result<Mode, BusError> {
    let Some(raw) = provider.get(keys::DEV_MODE) else {
        return Ok(Mode::Production);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Mode::Development),
        "false" | "0" | "no" | "" => Ok(Mode::Production),
        other => Err(BusError::InvalidMode(format!(
            "{}={} (expected true or false)",
            keys::DEV_MODE,
            other
        ))),
    }
}
