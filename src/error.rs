//! Error types for endpoint resolution, configuration loading, and secret lookup.

use thiserror::Error;

/// Errors raised while resolving message bus configuration.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("Missing configuration value: {key}")]
    ConfigMissing { key: String },

    #[error("Malformed address '{address}' for topic '{topic}': {reason}")]
    MalformedAddress {
        topic: String,
        address: String,
        reason: String,
    },

    #[error("Invalid topic direction: {0}")]
    InvalidDirection(String),

    #[error("Invalid transport kind '{kind}' for topic '{topic}'")]
    InvalidTransport { topic: String, kind: String },

    #[error("Malformed topic entry: {0}")]
    MalformedTopic(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Secret store error: {0}")]
    SecretStore(#[from] SecretError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BusError {
    /// Shorthand for a missing process-wide value.
    pub fn missing(key: impl Into<String>) -> Self {
        BusError::ConfigMissing { key: key.into() }
    }
}

/// Transient failures talking to the secret store.
///
/// An absent key is not an error; it is reported as `Ok(None)` by
/// [`crate::secrets::SecretStore::lookup`].
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Lookup of '{path}' timed out after {timeout_ms}ms")]
    Timeout { path: String, timeout_ms: u64 },

    #[error("Lookup of '{path}' failed: {message}")]
    Transport { path: String, message: String },

    #[error("Lookup of '{path}' returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Secret store unavailable: {0}")]
    Unavailable(String),
}
