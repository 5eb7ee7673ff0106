//! Busconf: Message Bus Endpoint Resolution
//!
//! Resolves, per topic, the transport and credential configuration a process
//! needs to join a publish/subscribe fabric, and probes whether a peer's port
//! is accepting connections before a transport is opened.

pub mod bus;
pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod secrets;
pub mod tooling;
pub mod topics;
pub mod types;
