use super::SecretStore;
use crate::error::{BusError, SecretError};
use crate::types::KeyMaterial;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// In-memory secret store with scripted contents.
///
/// Paths marked with [`MemorySecretStore::fail`] answer with a transport error,
/// which lets callers exercise the transient-failure path.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: RwLock<HashMap<String, KeyMaterial>>,
    failing: RwLock<HashMap<String, String>>,
    lookups: RwLock<Vec<String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, path: impl Into<String>, key: impl Into<KeyMaterial>) -> Self {
        self.insert(path, key);
        self
    }

    pub fn insert(&self, path: impl Into<String>, key: impl Into<KeyMaterial>) {
        self.entries.write().insert(path.into(), key.into());
    }

    /// Make every lookup of `path` fail with `message`.
    pub fn fail(self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.failing.write().insert(path.into(), message.into());
        self
    }

    /// Paths looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.read().clone()
    }

    /// Load a JSON object mapping secret paths to key text.
    pub fn from_json_file(path: &Path) -> Result<Self, BusError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BusError::ConfigError(format!(
                "Failed to read secrets file {}: {}",
                path.display(),
                e
            ))
        })?;
        let entries: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            BusError::ConfigError(format!(
                "Failed to parse secrets file {}: {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::new();
        for (secret_path, key) in entries {
            store.insert(secret_path, key.as_str());
        }
        Ok(store)
    }
}

impl SecretStore for MemorySecretStore {
    fn lookup(&self, path: &str) -> Result<Option<KeyMaterial>, SecretError> {
        self.lookups.write().push(path.to_string());
        if let Some(message) = self.failing.read().get(path) {
            return Err(SecretError::Transport {
                path: path.to_string(),
                message: message.clone(),
            });
        }
        Ok(self.entries.read().get(path).cloned())
    }
}
