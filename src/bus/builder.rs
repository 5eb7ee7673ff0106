//! MessageBusConfigBuilder: per-topic endpoint and credential resolution.

use super::endpoint::{
    EndpointConfig, LocalConfig, NetworkedPublishConfig, NetworkedSubscribeConfig,
    PublishCredentials, SubscribeCredentials, SUBSCRIBE_RESERVED_TOPIC,
};
use crate::config::{keys, ConfigProvider};
use crate::error::BusError;
use crate::secrets::{private_key_path, public_key_path, SecretStore};
use crate::types::{Direction, HostPort, KeyMaterial, Mode, PeerSet, TransportKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves endpoint configuration for one topic at a time.
///
/// Nothing is cached: every call re-reads the topic value and performs one
/// secret lookup per credential it needs.
pub struct MessageBusConfigBuilder {
    config: Arc<dyn ConfigProvider>,
    secrets: Arc<dyn SecretStore>,
    mode: Mode,
}

impl MessageBusConfigBuilder {
    pub fn new(
        config: Arc<dyn ConfigProvider>,
        secrets: Arc<dyn SecretStore>,
        mode: Mode,
    ) -> Self {
        Self {
            config,
            secrets,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Build the endpoint configuration for `topic`.
    ///
    /// `peers` must match `direction`: a subscriber list for publish, a single
    /// publisher for subscribe.
    pub fn build(
        &self,
        topic: &str,
        direction: Direction,
        peers: &PeerSet,
    ) -> Result<EndpointConfig, BusError> {
        let topic = topic.trim();
        if peers.direction() != direction {
            return Err(BusError::InvalidDirection(format!(
                "topic '{}' is resolved for {} but was given a {} peer set",
                topic,
                direction,
                peers.direction()
            )));
        }

        let (kind, address) = self.read_transport(topic)?;
        let config = match kind {
            TransportKind::Networked => {
                let endpoint = HostPort::parse(topic, &address)?;
                match peers {
                    PeerSet::Subscribers(subscribers) => {
                        self.build_publish(endpoint, subscribers)?
                    }
                    PeerSet::Publisher(publisher) => {
                        self.build_subscribe(topic, endpoint, publisher)?
                    }
                }
            }
            TransportKind::Local => {
                if address.is_empty() {
                    return Err(BusError::MalformedAddress {
                        topic: topic.to_string(),
                        address,
                        reason: "socket directory is empty".to_string(),
                    });
                }
                EndpointConfig::Local(LocalConfig {
                    socket_directory: address,
                })
            }
        };

        info!(
            topic,
            direction = %direction,
            kind = config.kind().as_str(),
            credentials = config.has_credentials(),
            "Resolved endpoint"
        );
        Ok(config)
    }

    /// Read and split `<topic>_cfg` into transport kind and trimmed address.
    fn read_transport(&self, topic: &str) -> Result<(TransportKind, String), BusError> {
        let key = keys::topic_config(topic);
        let raw = self.config.require(&key)?;
        let (kind, address) = raw
            .split_once(',')
            .ok_or_else(|| BusError::MalformedAddress {
                topic: topic.to_string(),
                address: raw.clone(),
                reason: "expected <transportKind>,<address>".to_string(),
            })?;

        if address.contains(',') {
            return Err(BusError::MalformedAddress {
                topic: topic.to_string(),
                address: raw.clone(),
                reason: "expected exactly one ',' between transport kind and address".to_string(),
            });
        }

        let kind = kind.trim();
        let transport = TransportKind::parse(kind).ok_or_else(|| BusError::InvalidTransport {
            topic: topic.to_string(),
            kind: kind.to_string(),
        })?;
        Ok((transport, address.trim().to_string()))
    }

    fn app_name(&self) -> Result<String, BusError> {
        Ok(self.config.require(keys::APP_NAME)?.trim().to_string())
    }

    fn lookup(&self, path: &str) -> Result<Option<KeyMaterial>, BusError> {
        Ok(self.secrets.lookup(path)?)
    }

    fn build_publish(
        &self,
        endpoint: HostPort,
        subscribers: &[String],
    ) -> Result<EndpointConfig, BusError> {
        if !self.mode.is_production() {
            return Ok(EndpointConfig::NetworkedPublish(NetworkedPublishConfig {
                endpoint,
                credentials: None,
            }));
        }

        let app_name = self.app_name()?;
        let mut authorized_peers = Vec::with_capacity(subscribers.len());
        for subscriber in subscribers {
            let subscriber = subscriber.trim();
            match self.lookup(&public_key_path(subscriber))? {
                Some(key) => authorized_peers.push(key),
                None => debug!(subscriber, "No public key for subscriber, not authorized"),
            }
        }

        let private_key = self.lookup(&private_key_path(&app_name))?;
        if private_key.is_none() {
            warn!(app = %app_name, "No private key found for publisher");
        }

        Ok(EndpointConfig::NetworkedPublish(NetworkedPublishConfig {
            endpoint,
            credentials: Some(PublishCredentials {
                private_key,
                authorized_peers,
            }),
        }))
    }

    fn build_subscribe(
        &self,
        topic: &str,
        endpoint: HostPort,
        publisher: &str,
    ) -> Result<EndpointConfig, BusError> {
        // The subscribe entry shares its mapping with the "kind" tag.
        if topic == SUBSCRIBE_RESERVED_TOPIC {
            return Err(BusError::MalformedTopic(format!(
                "'{}' is reserved and cannot name a subscribe topic",
                topic
            )));
        }

        let credentials = if self.mode.is_production() {
            let app_name = self.app_name()?;
            let publisher = publisher.trim();
            let credentials = SubscribeCredentials {
                publisher_public_key: self.lookup(&public_key_path(publisher))?,
                local_public_key: self.lookup(&public_key_path(&app_name))?,
                local_private_key: self.lookup(&private_key_path(&app_name))?,
            };
            if credentials.publisher_public_key.is_none()
                || credentials.local_public_key.is_none()
                || credentials.local_private_key.is_none()
            {
                warn!(topic, publisher, app = %app_name, "Subscriber credentials incomplete");
            }
            Some(credentials)
        } else {
            None
        };

        Ok(EndpointConfig::NetworkedSubscribe(NetworkedSubscribeConfig {
            topic: topic.to_string(),
            endpoint,
            credentials,
        }))
    }
}
