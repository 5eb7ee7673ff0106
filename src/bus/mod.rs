//! Message Bus Endpoint Resolution
//!
//! Turns a topic's `<transportKind>,<address>` value plus the peer set into a
//! typed [`EndpointConfig`]. In production mode networked endpoints also carry
//! key material fetched from the secret store. Local endpoints never do.

pub mod builder;
pub mod endpoint;
pub mod topology;

pub use builder::MessageBusConfigBuilder;
pub use endpoint::{
    EndpointConfig, LocalConfig, NetworkedPublishConfig, NetworkedSubscribeConfig,
    PublishCredentials, SubscribeCredentials,
};
pub use topology::{ResolvedTopic, TopologyResolver};
