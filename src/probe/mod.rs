//! Port Availability Probe
//!
//! Blocking readiness poll used before opening a networked transport, so a
//! subscriber does not connect to a publisher that is not listening yet.
//!
//! Polarity: the probe reports [`ProbeOutcome::Reachable`] as soon as one
//! connection attempt succeeds. Failed attempts are retried until the attempt
//! budget or deadline runs out, or the caller cancels.

pub mod cancel;
pub mod connector;
pub mod policy;

pub use cancel::CancelToken;
pub use connector::{Connector, TcpConnector};
pub use policy::RetryPolicy;

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a readiness probe. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Reachable { attempts: u32 },
    Unreachable { attempts: u32 },
    Cancelled { attempts: u32 },
    DeadlineExceeded { attempts: u32 },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }

    pub fn attempts(&self) -> u32 {
        match *self {
            ProbeOutcome::Reachable { attempts }
            | ProbeOutcome::Unreachable { attempts }
            | ProbeOutcome::Cancelled { attempts }
            | ProbeOutcome::DeadlineExceeded { attempts } => attempts,
        }
    }
}

/// Retrying connection probe.
pub struct PortProbe<C = TcpConnector> {
    connector: C,
    policy: RetryPolicy,
}

impl PortProbe<TcpConnector> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_connector(TcpConnector, policy)
    }
}

impl Default for PortProbe<TcpConnector> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<C: Connector> PortProbe<C> {
    pub fn with_connector(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Poll `host:port` until it accepts a connection.
    pub fn wait_until_reachable(&self, host: &str, port: u16, cancel: &CancelToken) -> ProbeOutcome {
        let started = Instant::now();
        debug!(host, port, max_attempts = self.policy.max_attempts, "Probing port");

        let mut attempts = 0;
        while attempts < self.policy.max_attempts {
            if cancel.is_cancelled() {
                return ProbeOutcome::Cancelled { attempts };
            }
            let remaining = self.policy.remaining(started.elapsed());
            if remaining == Some(Duration::ZERO) {
                warn!(host, port, attempts, "Probe deadline exceeded");
                return ProbeOutcome::DeadlineExceeded { attempts };
            }

            attempts += 1;
            let connect_timeout = capped(self.policy.connect_timeout, remaining);
            match self.connector.connect(host, port, connect_timeout) {
                Ok(()) => {
                    info!(host, port, attempts, "Port is up");
                    return ProbeOutcome::Reachable { attempts };
                }
                Err(e) => debug!(host, port, attempts, error = %e, "Port not up yet"),
            }

            if attempts < self.policy.max_attempts {
                let pause = capped(
                    self.policy.interval,
                    self.policy.remaining(started.elapsed()),
                );
                if cancel.sleep(pause) {
                    return ProbeOutcome::Cancelled { attempts };
                }
            }
        }

        warn!(host, port, attempts, "Port never became reachable");
        ProbeOutcome::Unreachable { attempts }
    }
}

/// `limit`, shortened to what is left of the deadline.
fn capped(limit: Duration, remaining: Option<Duration>) -> Duration {
    remaining.map_or(limit, |remaining| limit.min(remaining))
}

/// Probe with the default budget and report whether the port came up.
pub fn check_port_availability(host: &str, port: u16) -> bool {
    PortProbe::default()
        .wait_until_reachable(host, port, &CancelToken::new())
        .is_reachable()
}
