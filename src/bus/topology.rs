//! Whole-process resolution: every publish and subscribe topic in one pass.

use super::builder::MessageBusConfigBuilder;
use super::endpoint::EndpointConfig;
use crate::config::keys;
use crate::error::BusError;
use crate::topics::{split_list, topics_key};
use crate::types::{Direction, PeerSet, Topic};
use serde_json::json;

/// One resolved topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTopic {
    pub topic: Topic,
    pub peers: PeerSet,
    pub config: EndpointConfig,
}

impl ResolvedTopic {
    pub fn to_json(&self) -> Result<serde_json::Value, BusError> {
        let peers = match &self.peers {
            PeerSet::Subscribers(subscribers) => json!(subscribers),
            PeerSet::Publisher(publisher) => json!(publisher),
        };
        Ok(json!({
            "topic": self.topic.name,
            "direction": self.topic.direction.as_str(),
            "peers": peers,
            "config": self.config.to_json()?,
        }))
    }
}

/// Split a subscribe entry written `<publisher>/<topic>`.
pub fn split_subscription(entry: &str) -> Result<(String, String), BusError> {
    let (publisher, topic) = entry.split_once('/').ok_or_else(|| {
        BusError::MalformedTopic(format!(
            "'{}' (subscribe topics are written <publisher>/<topic>)",
            entry
        ))
    })?;
    let publisher = publisher.trim();
    let topic = topic.trim();
    if publisher.is_empty() || topic.is_empty() {
        return Err(BusError::MalformedTopic(format!(
            "'{}' (publisher and topic must both be non-empty)",
            entry
        )));
    }
    Ok((publisher.to_string(), topic.to_string()))
}

/// Resolves every topic the process is configured for.
///
/// Publish topics share the subscriber list in `Clients`. A role whose topic
/// list is absent contributes no topics.
pub struct TopologyResolver<'a> {
    builder: &'a MessageBusConfigBuilder,
}

impl<'a> TopologyResolver<'a> {
    pub fn new(builder: &'a MessageBusConfigBuilder) -> Self {
        Self { builder }
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.builder
            .config()
            .get(key)
            .map(|raw| split_list(&raw))
            .unwrap_or_default()
    }

    /// Publish topics first, then subscribe topics, each in listed order.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedTopic>, BusError> {
        let mut resolved = Vec::new();

        let subscribers = PeerSet::Subscribers(self.list(keys::CLIENTS));
        for name in self.list(topics_key(Direction::Publish)) {
            let config = self.builder.build(&name, Direction::Publish, &subscribers)?;
            resolved.push(ResolvedTopic {
                topic: Topic::new(&name, Direction::Publish),
                peers: subscribers.clone(),
                config,
            });
        }

        for entry in self.list(topics_key(Direction::Subscribe)) {
            let (publisher, name) = split_subscription(&entry)?;
            let peers = PeerSet::Publisher(publisher);
            let config = self.builder.build(&name, Direction::Subscribe, &peers)?;
            resolved.push(ResolvedTopic {
                topic: Topic::new(&name, Direction::Subscribe),
                peers,
                config,
            });
        }

        Ok(resolved)
    }
}
