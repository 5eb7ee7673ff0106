//! Core types shared by topic enumeration and endpoint resolution.

use crate::error::BusError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Direction of a topic from the local application's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Publish,
    Subscribe,
}

impl Direction {
    /// Short form used in configuration keys and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Publish => "pub",
            Direction::Subscribe => "sub",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pub" | "publish" => Ok(Direction::Publish),
            "sub" | "subscribe" => Ok(Direction::Subscribe),
            other => Err(BusError::InvalidDirection(format!(
                "'{}' (must be 'pub' or 'sub')",
                other
            ))),
        }
    }
}

/// Deployment mode. Production requires credential material, development never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn from_dev_mode(dev_mode: bool) -> Self {
        if dev_mode {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl FromStr for Mode {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Mode::Development),
            "prod" | "production" => Ok(Mode::Production),
            other => Err(BusError::InvalidMode(other.to_string())),
        }
    }
}

/// Transport family named by the first field of a `<topic>_cfg` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Networked,
    Local,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Networked => "networked",
            TransportKind::Local => "local",
        }
    }

    /// Parse a transport kind, returning `None` for unrecognized values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "networked" | "tcp" | "zmq_tcp" => Some(TransportKind::Networked),
            "local" | "ipc" | "zmq_ipc" => Some(TransportKind::Local),
            _ => None,
        }
    }
}

/// A named topic and the direction the local application uses it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub direction: Direction,
}

impl Topic {
    pub fn new(name: impl AsRef<str>, direction: Direction) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            direction,
        }
    }
}

/// Host and port of a networked transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPort {
    pub host: String,
    pub port: u16,
}

impl HostPort {
    /// Parse `host:port`, splitting on the last colon.
    pub fn parse(topic: &str, address: &str) -> Result<Self, BusError> {
        let malformed = |reason: &str| BusError::MalformedAddress {
            topic: topic.to_string(),
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| malformed("expected host:port"))?;
        let host = host.trim();
        if host.is_empty() {
            return Err(malformed("host is empty"));
        }
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| malformed("port is not an integer in 1..=65535"))?;
        if port == 0 {
            return Err(malformed("port must be positive"));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// Peer identities a topic is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerSet {
    /// Subscribers allowed to connect to a publish topic, in order.
    Subscribers(Vec<String>),
    /// The single publisher a subscribe topic connects to.
    Publisher(String),
}

impl PeerSet {
    pub fn direction(&self) -> Direction {
        match self {
            PeerSet::Subscribers(_) => Direction::Publish,
            PeerSet::Publisher(_) => Direction::Subscribe,
        }
    }
}

/// Opaque key bytes fetched from the secret store.
///
/// Curve keys are exchanged as printable text. Serialization emits UTF-8 and
/// fails on anything else.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
}

impl From<&str> for KeyMaterial {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial(<redacted, {} bytes>)", self.0.len())
    }
}

impl Serialize for KeyMaterial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = std::str::from_utf8(&self.0)
            .map_err(|_| serde::ser::Error::custom("key material is not valid UTF-8"))?;
        serializer.serialize_str(text)
    }
}
