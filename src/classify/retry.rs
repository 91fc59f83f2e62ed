use std::time::Duration;

use crate::config::Config;

/// Linear backoff: attempt `n` (1-based) waits `n × backoff` before the next try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let config = Config::default();
        Self {
            max_attempts: config.max_attempts,
            backoff: config.retry_backoff,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_attempts, config.retry_backoff)
    }

    /// Delay before retrying after failed attempt `attempt`.
    #[inline]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }

    /// Returns `true` if another attempt is allowed after `attempt`.
    #[inline]
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
