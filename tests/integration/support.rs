use busconf::config::{BusSettings, MapProvider};
use busconf::secrets::MemorySecretStore;
use busconf::tooling::CliContext;
use busconf::types::Mode;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Values describing an analytics app: two publish topics, one subscription.
pub fn analytics_values() -> MapProvider {
    MapProvider::new()
        .with("AppName", "Analytics")
        .with("PubTopics", "results, alerts")
        .with("SubTopics", "Ingest/cam1")
        .with("Clients", "Visualizer, Recorder")
        .with("results_cfg", "networked, 0.0.0.0:65013")
        .with("alerts_cfg", "local, /run/bus")
        .with("cam1_cfg", "zmq_tcp, ingest:65012")
}

pub fn analytics_secrets() -> MemorySecretStore {
    MemorySecretStore::new()
        .with("/Publickeys/Visualizer", "visualizer-public")
        .with("/Publickeys/Ingest", "ingest-public")
        .with("/Publickeys/Analytics", "analytics-public")
        .with("/Analytics/private_key", "analytics-private")
}

pub fn context(values: MapProvider, secrets: MemorySecretStore, mode: Mode) -> CliContext {
    CliContext::with_parts(
        BusSettings::default(),
        Arc::new(values),
        Arc::new(secrets),
        mode,
    )
}

/// Write a settings file whose [values] table carries the analytics topology.
pub fn write_settings(dir: &Path, dev_mode: bool) -> PathBuf {
    let path = dir.join("busconf.toml");
    let content = format!(
        r#"[probe]
max_attempts = 2
interval_ms = 1

[values]
AppName = "Analytics"
DevMode = "{dev_mode}"
PubTopics = "results"
SubTopics = "Ingest/cam1"
Clients = "Visualizer,Recorder"
results_cfg = "networked,0.0.0.0:65013"
cam1_cfg = "networked,ingest:65012"
"#
    );
    std::fs::write(&path, content).unwrap();
    path
}

pub fn write_secrets(dir: &Path) -> PathBuf {
    let path = dir.join("secrets.json");
    std::fs::write(
        &path,
        r#"{
  "/Publickeys/Visualizer": "visualizer-public",
  "/Publickeys/Ingest": "ingest-public",
  "/Analytics/private_key": "analytics-private"
}"#,
    )
    .unwrap();
    path
}
