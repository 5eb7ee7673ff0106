//! Topic Enumeration
//!
//! Reads the topics a process publishes or subscribes to from the role's
//! comma-separated value (`PubTopics` / `SubTopics`).

use crate::config::{keys, ConfigProvider};
use crate::error::BusError;
use crate::types::Direction;

/// Name of the value listing topics for `role`.
pub fn topics_key(role: Direction) -> &'static str {
    match role {
        Direction::Publish => keys::PUB_TOPICS,
        Direction::Subscribe => keys::SUB_TOPICS,
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Order is preserved and duplicates are kept.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Topic names for one role, in listed order.
pub struct TopicEnumerator<'a> {
    config: &'a dyn ConfigProvider,
}

impl<'a> TopicEnumerator<'a> {
    pub fn new(config: &'a dyn ConfigProvider) -> Self {
        Self { config }
    }

    /// Topics for `role`. Fails with `ConfigMissing` when the role's value is absent.
    pub fn topics(&self, role: Direction) -> Result<Vec<String>, BusError> {
        let raw = self.config.require(topics_key(role))?;
        Ok(split_list(&raw))
    }
}
