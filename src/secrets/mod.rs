//! Secret Store
//!
//! Key material is fetched through the [`SecretStore`] capability. A lookup has
//! three outcomes that callers must keep apart:
//!
//! - `Ok(Some(key))`: the key exists
//! - `Ok(None)`: the key does not exist (peer not provisioned or not authorized)
//! - `Err(SecretError)`: the store could not answer (timeout, transport, status)

pub mod http;
pub mod memory;

pub use http::HttpSecretStore;
pub use memory::MemorySecretStore;

use crate::error::SecretError;
use crate::types::KeyMaterial;

/// Key-value lookup into the remote secret store.
pub trait SecretStore: Send + Sync {
    fn lookup(&self, path: &str) -> Result<Option<KeyMaterial>, SecretError>;
}

/// Store used when none is configured. Every lookup fails as unavailable, so a
/// production resolution never mistakes a missing store for missing keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSecretStore;

impl SecretStore for UnconfiguredSecretStore {
    fn lookup(&self, path: &str) -> Result<Option<KeyMaterial>, SecretError> {
        Err(SecretError::Unavailable(format!(
            "no secret store configured (looking up '{}')",
            path
        )))
    }
}

/// Path of the public key published for `identity`.
pub fn public_key_path(identity: &str) -> String {
    format!("/Publickeys/{}", identity)
}

/// Path of the private key owned by `app_name`.
pub fn private_key_path(app_name: &str) -> String {
    format!("/{}/private_key", app_name)
}
