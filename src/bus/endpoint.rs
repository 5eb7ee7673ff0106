//! Resolved endpoint shapes and their mapping serialization.

use crate::error::BusError;
use crate::types::{HostPort, KeyMaterial, TransportKind};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Topic name that would collide with the `kind` tag in a subscribe mapping.
pub const SUBSCRIBE_RESERVED_TOPIC: &str = "kind";

/// Credentials attached to a networked publisher in production mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCredentials {
    /// Local private key; `None` when the store had no key
    pub private_key: Option<KeyMaterial>,
    /// Public keys of subscribers whose keys resolved, in peer order
    pub authorized_peers: Vec<KeyMaterial>,
}

/// Credentials attached to a networked subscriber in production mode.
///
/// Every field is always present in the serialized form, `null` when the
/// lookup came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeCredentials {
    pub publisher_public_key: Option<KeyMaterial>,
    pub local_public_key: Option<KeyMaterial>,
    pub local_private_key: Option<KeyMaterial>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkedPublishConfig {
    pub endpoint: HostPort,
    /// `None` in development mode
    pub credentials: Option<PublishCredentials>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkedSubscribeConfig {
    /// Topic the endpoint entry is keyed by
    pub topic: String,
    pub endpoint: HostPort,
    /// `None` in development mode
    pub credentials: Option<SubscribeCredentials>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    pub socket_directory: String,
}

/// Everything a transport needs to open one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointConfig {
    NetworkedPublish(NetworkedPublishConfig),
    NetworkedSubscribe(NetworkedSubscribeConfig),
    Local(LocalConfig),
}

impl EndpointConfig {
    pub fn kind(&self) -> TransportKind {
        match self {
            EndpointConfig::NetworkedPublish(_) | EndpointConfig::NetworkedSubscribe(_) => {
                TransportKind::Networked
            }
            EndpointConfig::Local(_) => TransportKind::Local,
        }
    }

    /// Whether any key material section is attached.
    pub fn has_credentials(&self) -> bool {
        match self {
            EndpointConfig::NetworkedPublish(c) => c.credentials.is_some(),
            EndpointConfig::NetworkedSubscribe(c) => c.credentials.is_some(),
            EndpointConfig::Local(_) => false,
        }
    }

    /// Host and port for networked endpoints.
    pub fn host_port(&self) -> Option<&HostPort> {
        match self {
            EndpointConfig::NetworkedPublish(c) => Some(&c.endpoint),
            EndpointConfig::NetworkedSubscribe(c) => Some(&c.endpoint),
            EndpointConfig::Local(_) => None,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, BusError> {
        serde_json::to_value(self)
            .map_err(|e| BusError::ConfigError(format!("Failed to serialize endpoint: {}", e)))
    }
}

#[derive(Serialize)]
struct PublishEntry<'a> {
    host: &'a str,
    port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<&'a Option<KeyMaterial>>,
}

#[derive(Serialize)]
struct SubscribeEntry<'a> {
    host: &'a str,
    port: u16,
    #[serde(flatten)]
    credentials: Option<&'a SubscribeCredentials>,
}

impl Serialize for EndpointConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EndpointConfig::NetworkedPublish(c) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("kind", TransportKind::Networked.as_str())?;
                map.serialize_entry(
                    "publish",
                    &PublishEntry {
                        host: &c.endpoint.host,
                        port: c.endpoint.port,
                        private_key: c.credentials.as_ref().map(|cr| &cr.private_key),
                    },
                )?;
                if let Some(credentials) = &c.credentials {
                    map.serialize_entry("authorized_peers", &credentials.authorized_peers)?;
                }
                map.end()
            }
            EndpointConfig::NetworkedSubscribe(c) => {
                if c.topic == SUBSCRIBE_RESERVED_TOPIC {
                    return Err(serde::ser::Error::custom(format!(
                        "subscribe topic '{}' collides with the kind tag",
                        c.topic
                    )));
                }
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", TransportKind::Networked.as_str())?;
                map.serialize_entry(
                    &c.topic,
                    &SubscribeEntry {
                        host: &c.endpoint.host,
                        port: c.endpoint.port,
                        credentials: c.credentials.as_ref(),
                    },
                )?;
                map.end()
            }
            EndpointConfig::Local(c) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", TransportKind::Local.as_str())?;
                map.serialize_entry("socket_directory", &c.socket_directory)?;
                map.end()
            }
        }
    }
}
