//! CLI Tooling
//!
//! Command-line interface for topic enumeration, endpoint resolution, and port
//! probing. Every command renders to a string so it can be asserted on in tests.

use crate::bus::topology::split_subscription;
use crate::bus::{MessageBusConfigBuilder, TopologyResolver};
use crate::config::{keys, resolve_mode, BusSettings, ConfigLoader, ConfigProvider};
use crate::error::BusError;
use crate::logging::LoggingConfig;
use crate::probe::{CancelToken, PortProbe};
use crate::secrets::{HttpSecretStore, MemorySecretStore, SecretStore, UnconfiguredSecretStore};
use crate::topics::{split_list, TopicEnumerator};
use crate::types::{Direction, Mode, PeerSet};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Busconf CLI - message bus endpoint resolution
#[derive(Parser)]
#[command(name = "busconf")]
#[command(about = "Resolve per-topic message bus endpoints and credentials")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML); its [values] table backs the process environment
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file mapping secret paths to keys, used instead of the remote store
    #[arg(long)]
    pub secrets_file: Option<PathBuf>,

    /// Override the DevMode value (true = development, false = production)
    #[arg(long)]
    pub dev_mode: Option<bool>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the settings file's logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the topics configured for a role
    Topics {
        /// Topic role (pub or sub)
        #[arg(long)]
        role: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve the endpoint configuration of one topic
    Resolve {
        /// Topic name; subscribe topics may be written <publisher>/<topic>
        #[arg(long)]
        topic: String,
        /// Topic direction (pub or sub)
        #[arg(long)]
        direction: String,
        /// Subscribers (pub) or the publisher (sub); pub defaults to Clients
        #[arg(long, value_delimiter = ',')]
        peers: Vec<String>,
    },
    /// Resolve every configured publish and subscribe topic
    ResolveAll,
    /// Wait until host:port accepts connections
    Probe {
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        /// Override the configured attempt budget
        #[arg(long)]
        attempts: Option<u32>,
        /// Override the configured pause between attempts
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

/// Loaded settings, value provider, secret store, and mode shared by commands.
pub struct CliContext {
    settings: BusSettings,
    config: Arc<dyn ConfigProvider>,
    secrets: Arc<dyn SecretStore>,
    mode: Mode,
}

impl CliContext {
    /// Load settings and values from `config_path` and the environment.
    pub fn new(
        config_path: Option<PathBuf>,
        secrets_file: Option<PathBuf>,
        dev_mode: Option<bool>,
    ) -> Result<Self, BusError> {
        let settings = ConfigLoader::load(config_path.as_deref())?;
        let config = ConfigLoader::provider(config_path.as_deref())?;

        let secrets: Arc<dyn SecretStore> = match secrets_file {
            Some(path) => Arc::new(MemorySecretStore::from_json_file(&path)?),
            None => match HttpSecretStore::from_settings(&settings.secret_store)? {
                Some(store) => Arc::new(store),
                None => Arc::new(UnconfiguredSecretStore),
            },
        };

        let mode = match dev_mode {
            Some(dev_mode) => Mode::from_dev_mode(dev_mode),
            None => resolve_mode(config.as_ref())?,
        };

        Ok(Self::with_parts(settings, config, secrets, mode))
    }

    pub fn with_parts(
        settings: BusSettings,
        config: Arc<dyn ConfigProvider>,
        secrets: Arc<dyn SecretStore>,
        mode: Mode,
    ) -> Self {
        Self {
            settings,
            config,
            secrets,
            mode,
        }
    }

    pub fn settings(&self) -> &BusSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn builder(&self) -> MessageBusConfigBuilder {
        MessageBusConfigBuilder::new(
            Arc::clone(&self.config),
            Arc::clone(&self.secrets),
            self.mode,
        )
    }

    /// Execute a command and render its output.
    pub fn execute(&self, command: &Commands) -> Result<String, BusError> {
        match command {
            Commands::Topics { role, format } => self.handle_topics(role, format),
            Commands::Resolve {
                topic,
                direction,
                peers,
            } => self.handle_resolve(topic, direction, peers),
            Commands::ResolveAll => self.handle_resolve_all(),
            Commands::Probe {
                host,
                port,
                attempts,
                interval_ms,
            } => self.handle_probe(host, *port, *attempts, *interval_ms),
        }
    }

    fn handle_topics(&self, role: &str, format: &str) -> Result<String, BusError> {
        let role: Direction = role.parse()?;
        let topics = TopicEnumerator::new(self.config.as_ref()).topics(role)?;

        match format {
            "json" => Ok(json!({ "role": role.as_str(), "topics": topics }).to_string()),
            "text" => {
                if topics.is_empty() {
                    return Ok(format!("No {} topics configured.", role));
                }
                let mut table = Table::new();
                table.load_preset(UTF8_BORDERS_ONLY);
                table.set_header(vec!["#", "Topic"]);
                for (index, topic) in topics.iter().enumerate() {
                    table.add_row(vec![index.to_string(), topic.clone()]);
                }
                Ok(table.to_string())
            }
            other => Err(BusError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn handle_resolve(
        &self,
        topic: &str,
        direction: &str,
        peers: &[String],
    ) -> Result<String, BusError> {
        let direction: Direction = direction.parse()?;
        let (topic, peers) = match direction {
            Direction::Publish => {
                let subscribers = if peers.is_empty() {
                    self.config
                        .get(keys::CLIENTS)
                        .map(|raw| split_list(&raw))
                        .unwrap_or_default()
                } else {
                    peers.to_vec()
                };
                (topic.to_string(), PeerSet::Subscribers(subscribers))
            }
            Direction::Subscribe => match peers {
                [publisher] => (topic.to_string(), PeerSet::Publisher(publisher.clone())),
                [] => {
                    let (publisher, topic) = split_subscription(topic)?;
                    (topic, PeerSet::Publisher(publisher))
                }
                _ => {
                    return Err(BusError::InvalidDirection(format!(
                        "a subscribe topic takes exactly one publisher, got {}",
                        peers.len()
                    )))
                }
            },
        };

        let config = self.builder().build(&topic, direction, &peers)?;
        pretty(&config.to_json()?)
    }

    fn handle_resolve_all(&self) -> Result<String, BusError> {
        let builder = self.builder();
        let resolved = TopologyResolver::new(&builder).resolve_all()?;
        info!(topics = resolved.len(), "Resolved topology");

        let entries = resolved
            .iter()
            .map(|r| r.to_json())
            .collect::<Result<Vec<_>, _>>()?;
        pretty(&json!({ "mode": mode_name(self.mode), "topics": entries }))
    }

    fn handle_probe(
        &self,
        host: &str,
        port: u16,
        attempts: Option<u32>,
        interval_ms: Option<u64>,
    ) -> Result<String, BusError> {
        let mut policy = self.settings.probe.retry_policy();
        if let Some(attempts) = attempts {
            policy = policy.with_max_attempts(attempts);
        }
        if let Some(interval_ms) = interval_ms {
            policy = policy.with_interval(Duration::from_millis(interval_ms));
        }

        let outcome = PortProbe::new(policy).wait_until_reachable(host, port, &CancelToken::new());
        let mut report = serde_json::to_value(outcome)
            .map_err(|e| BusError::ConfigError(format!("Failed to serialize outcome: {}", e)))?;
        report["host"] = json!(host);
        report["port"] = json!(port);
        report["reachable"] = json!(outcome.is_reachable());
        Ok(report.to_string())
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Development => "development",
        Mode::Production => "production",
    }
}

fn pretty(value: &serde_json::Value) -> Result<String, BusError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BusError::ConfigError(format!("Failed to render output: {}", e)))
}
