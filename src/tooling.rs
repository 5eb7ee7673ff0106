//! Tooling Layer
//!
//! Command-line surface over topic enumeration, endpoint resolution, and the
//! readiness probe.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
