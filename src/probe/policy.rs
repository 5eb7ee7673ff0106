use std::time::Duration;

/// Bounded retry schedule for readiness polling.
///
/// The defaults give 1000 attempts spaced 100ms apart, roughly 100 seconds
/// of waiting for a peer that never starts listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total connection attempts, including the first
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub interval: Duration,
    /// Bound on each individual connection attempt
    pub connect_timeout: Duration,
    /// Overall wall-clock bound; also caps each sleep and connect timeout
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            interval: Duration::from_millis(100),
            connect_timeout: Duration::from_millis(100),
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Time left before the deadline, given `elapsed`. `None` without a deadline.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(elapsed))
    }

    /// Upper bound on time spent sleeping between attempts.
    pub fn sleep_budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}
