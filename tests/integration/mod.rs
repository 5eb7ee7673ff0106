//! Integration tests for endpoint resolution, the CLI surface, and the readiness probe

mod cli_contracts;
mod probe_readiness;
mod resolve_contracts;
mod support;
