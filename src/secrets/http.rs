//! HTTP-backed secret store.
//!
//! `GET <endpoint><path>`: 200 returns the body as key material, 404 means the
//! key is absent, anything else is a transient failure. Every lookup is bounded
//! by the configured timeout.

use super::SecretStore;
use crate::config::SecretStoreSettings;
use crate::error::{BusError, SecretError};
use crate::types::KeyMaterial;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

pub struct HttpSecretStore {
    endpoint: String,
    timeout: Duration,
    auth_token: Option<String>,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpSecretStore {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, BusError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                BusError::ConfigError(format!("Failed to create secret store runtime: {}", e))
            })?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
            auth_token: None,
            client: reqwest::Client::new(),
            runtime,
        })
    }

    /// Build a store from settings, or `None` when no endpoint is configured.
    pub fn from_settings(settings: &SecretStoreSettings) -> Result<Option<Self>, BusError> {
        let Some(endpoint) = settings.endpoint.as_deref() else {
            return Ok(None);
        };
        let store = Self::new(endpoint, Duration::from_millis(settings.timeout_ms))?;
        Ok(Some(match &settings.auth_token {
            Some(token) => store.with_auth_token(token.clone()),
            None => store,
        }))
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    async fn fetch(&self, path: &str) -> Result<Option<KeyMaterial>, SecretError> {
        let transport = |e: reqwest::Error| SecretError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let mut request = self.client.get(self.url_for(path));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport)?;
        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(transport)?;
                Ok(Some(KeyMaterial::new(body.to_vec())))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(SecretError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

impl SecretStore for HttpSecretStore {
    fn lookup(&self, path: &str) -> Result<Option<KeyMaterial>, SecretError> {
        debug!(path, "Secret lookup");
        self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, self.fetch(path))
                .await
                .map_err(|_| SecretError::Timeout {
                    path: path.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                })?
        })
    }
}
