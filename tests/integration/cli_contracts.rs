use busconf::error::{BusError, SecretError};
use busconf::secrets::MemorySecretStore;
use busconf::tooling::cli::{CliContext, Commands};
use busconf::types::Mode;
use tempfile::TempDir;

use super::support::{analytics_secrets, analytics_values, context, write_secrets, write_settings};

#[test]
fn topics_json_contract_lists_role_and_topics() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);
    let output = cli
        .execute(&Commands::Topics {
            role: "pub".to_string(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["role"], "pub");
    assert_eq!(parsed["topics"], serde_json::json!(["results", "alerts"]));
}

#[test]
fn topics_text_renders_a_table() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);
    let output = cli
        .execute(&Commands::Topics {
            role: "sub".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Topic"));
    assert!(output.contains("Ingest/cam1"));
}

#[test]
fn topics_rejects_unknown_role() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);
    let err = cli
        .execute(&Commands::Topics {
            role: "both".to_string(),
            format: "json".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, BusError::InvalidDirection(_)));
}

#[test]
fn resolve_publish_defaults_peers_to_clients() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Production);
    let output = cli
        .execute(&Commands::Resolve {
            topic: "results".to_string(),
            direction: "pub".to_string(),
            peers: vec![],
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["kind"], "networked");
    assert_eq!(parsed["publish"]["port"], 65013);
    assert_eq!(parsed["publish"]["private_key"], "analytics-private");
    assert_eq!(
        parsed["authorized_peers"],
        serde_json::json!(["visualizer-public"])
    );
}

#[test]
fn resolve_subscribe_accepts_publisher_prefix() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Production);
    let output = cli
        .execute(&Commands::Resolve {
            topic: "Ingest/cam1".to_string(),
            direction: "subscribe".to_string(),
            peers: vec![],
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["cam1"]["host"], "ingest");
    assert_eq!(parsed["cam1"]["publisher_public_key"], "ingest-public");
    assert_eq!(parsed["cam1"]["local_private_key"], "analytics-private");
}

#[test]
fn resolve_subscribe_rejects_multiple_publishers() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);
    let err = cli
        .execute(&Commands::Resolve {
            topic: "cam1".to_string(),
            direction: "sub".to_string(),
            peers: vec!["a".to_string(), "b".to_string()],
        })
        .unwrap_err();
    assert!(matches!(err, BusError::InvalidDirection(_)));
}

#[test]
fn production_secret_store_failure_surfaces() {
    let secrets = MemorySecretStore::new().fail("/Publickeys/Visualizer", "timed out");
    let cli = context(analytics_values(), secrets, Mode::Production);
    let err = cli.execute(&Commands::ResolveAll).unwrap_err();
    assert!(matches!(
        err,
        BusError::SecretStore(SecretError::Transport { .. })
    ));
}

#[test]
fn settings_file_drives_resolve_all() {
    let temp = TempDir::new().unwrap();
    let settings = write_settings(temp.path(), false);
    let secrets = write_secrets(temp.path());

    let cli = CliContext::new(Some(settings), Some(secrets), None).unwrap();
    assert_eq!(cli.mode(), Mode::Production);
    assert_eq!(cli.settings().probe.max_attempts, 2);

    let output = cli.execute(&Commands::ResolveAll).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["mode"], "production");

    let topics = parsed["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0]["topic"], "results");
    assert_eq!(topics[0]["direction"], "pub");
    assert_eq!(
        topics[0]["config"]["authorized_peers"],
        serde_json::json!(["visualizer-public"])
    );
    assert_eq!(topics[1]["topic"], "cam1");
    assert_eq!(topics[1]["peers"], "Ingest");
    assert!(topics[1]["config"]["cam1"]["local_public_key"].is_null());
}

#[test]
fn dev_mode_value_skips_the_secret_store() {
    let temp = TempDir::new().unwrap();
    let settings = write_settings(temp.path(), true);

    let cli = CliContext::new(Some(settings), None, None).unwrap();
    assert_eq!(cli.mode(), Mode::Development);

    let output = cli.execute(&Commands::ResolveAll).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["mode"], "development");
    assert!(parsed["topics"][0]["config"].get("authorized_peers").is_none());
}

#[test]
fn production_without_secret_store_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let settings = write_settings(temp.path(), true);

    let cli = CliContext::new(Some(settings), None, Some(false)).unwrap();
    let err = cli.execute(&Commands::ResolveAll).unwrap_err();
    assert!(matches!(
        err,
        BusError::SecretStore(SecretError::Unavailable(_))
    ));
}
