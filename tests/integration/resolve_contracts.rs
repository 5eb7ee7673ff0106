use busconf::bus::{EndpointConfig, MessageBusConfigBuilder, TopologyResolver};
use busconf::config::MapProvider;
use busconf::error::BusError;
use busconf::secrets::MemorySecretStore;
use busconf::topics::TopicEnumerator;
use busconf::types::{Direction, KeyMaterial, Mode, PeerSet};
use serde_json::json;
use std::sync::Arc;

use super::support::{analytics_secrets, analytics_values};

fn builder(values: MapProvider, secrets: MemorySecretStore, mode: Mode) -> MessageBusConfigBuilder {
    MessageBusConfigBuilder::new(Arc::new(values), Arc::new(secrets), mode)
}

#[test]
fn enumerated_topics_resolve_in_listed_order() {
    let values = analytics_values();
    let topics = TopicEnumerator::new(&values)
        .topics(Direction::Publish)
        .unwrap();
    assert_eq!(topics, vec!["results", "alerts"]);

    let b = builder(values, analytics_secrets(), Mode::Development);
    let peers = PeerSet::Subscribers(vec![]);
    let kinds: Vec<_> = topics
        .iter()
        .map(|t| b.build(t, Direction::Publish, &peers).unwrap().kind().as_str())
        .collect();
    assert_eq!(kinds, vec!["networked", "local"]);
}

#[test]
fn development_publish_json_shape() {
    let values = MapProvider::new().with("t_cfg", "networked,host:1234");
    let b = builder(values, MemorySecretStore::new(), Mode::Development);
    let config = b
        .build("t", Direction::Publish, &PeerSet::Subscribers(vec!["s1".into()]))
        .unwrap();
    assert_eq!(
        config.to_json().unwrap(),
        json!({ "kind": "networked", "publish": { "host": "host", "port": 1234 } })
    );
}

#[test]
fn production_publish_json_shape() {
    let values = MapProvider::new()
        .with("AppName", "app")
        .with("t_cfg", "networked,host:1234");
    let secrets = MemorySecretStore::new()
        .with("/Publickeys/s1", "s1-public")
        .with("/app/private_key", "app-private");
    let b = builder(values, secrets, Mode::Production);

    let config = b
        .build(
            "t",
            Direction::Publish,
            &PeerSet::Subscribers(vec!["s1".into(), "s2".into()]),
        )
        .unwrap();
    assert_eq!(
        config.to_json().unwrap(),
        json!({
            "kind": "networked",
            "publish": { "host": "host", "port": 1234, "private_key": "app-private" },
            "authorized_peers": ["s1-public"]
        })
    );
}

#[test]
fn development_subscribe_json_shape() {
    let values = MapProvider::new().with("t_cfg", "networked,host:1234");
    let b = builder(values, MemorySecretStore::new(), Mode::Development);
    let config = b
        .build("t", Direction::Subscribe, &PeerSet::Publisher("p".into()))
        .unwrap();
    assert_eq!(
        config.to_json().unwrap(),
        json!({ "kind": "networked", "t": { "host": "host", "port": 1234 } })
    );
}

#[test]
fn local_topic_is_identical_in_both_modes() {
    for mode in [Mode::Development, Mode::Production] {
        let values = MapProvider::new()
            .with("AppName", "app")
            .with("t_cfg", "local,/tmp/sock");
        let b = builder(values, analytics_secrets(), mode);
        for (direction, peers) in [
            (Direction::Publish, PeerSet::Subscribers(vec!["s1".into()])),
            (Direction::Subscribe, PeerSet::Publisher("p".into())),
        ] {
            let config = b.build("t", direction, &peers).unwrap();
            assert!(!config.has_credentials());
            assert_eq!(
                config.to_json().unwrap(),
                json!({ "kind": "local", "socket_directory": "/tmp/sock" })
            );
        }
    }
}

#[test]
fn unrecognized_transport_never_yields_a_config() {
    let values = MapProvider::new().with("t_cfg", "foo,bar");
    for mode in [Mode::Development, Mode::Production] {
        let b = builder(values.clone(), MemorySecretStore::new(), mode);
        let result = b.build("t", Direction::Subscribe, &PeerSet::Publisher("p".into()));
        assert!(matches!(result, Err(BusError::InvalidTransport { .. })));
    }
}

#[test]
fn production_topology_resolves_credentials_per_direction() {
    let b = builder(analytics_values(), analytics_secrets(), Mode::Production);
    let resolved = TopologyResolver::new(&b).resolve_all().unwrap();
    assert_eq!(resolved.len(), 3);

    match &resolved[0].config {
        EndpointConfig::NetworkedPublish(c) => {
            assert_eq!(c.endpoint.host, "0.0.0.0");
            let credentials = c.credentials.as_ref().unwrap();
            assert_eq!(
                credentials.authorized_peers,
                vec![KeyMaterial::from("visualizer-public")]
            );
            assert_eq!(
                credentials.private_key,
                Some(KeyMaterial::from("analytics-private"))
            );
        }
        other => panic!("Expected networked publish, got {:?}", other),
    }

    match &resolved[2].config {
        EndpointConfig::NetworkedSubscribe(c) => {
            assert_eq!(c.topic, "cam1");
            let credentials = c.credentials.as_ref().unwrap();
            assert_eq!(
                credentials.publisher_public_key,
                Some(KeyMaterial::from("ingest-public"))
            );
            assert_eq!(
                credentials.local_public_key,
                Some(KeyMaterial::from("analytics-public"))
            );
        }
        other => panic!("Expected networked subscribe, got {:?}", other),
    }
}

#[test]
fn subscribe_entry_without_publisher_is_rejected() {
    let values = analytics_values().with("SubTopics", "cam1");
    let b = builder(values, analytics_secrets(), Mode::Development);
    let err = TopologyResolver::new(&b).resolve_all().unwrap_err();
    assert!(matches!(err, BusError::MalformedTopic(_)));
}
