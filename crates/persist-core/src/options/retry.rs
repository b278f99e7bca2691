//! Retry-on-failure policy for transient backend errors

use rand::Rng;
use std::time::Duration;

/// Bounded retry policy applied below the provider
///
/// The delay before the `n`th retry (1-based) grows as `2^n - 1` seconds,
/// scaled by a jitter factor in `[1.0, 1.1)` and capped at `max_retry_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retry_count: u32,
    /// Upper bound for a single backoff delay
    pub max_retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retry_count: 6,
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    const COEFFICIENT: Duration = Duration::from_secs(1);
    const MAX_JITTER: f64 = 1.1;

    /// Create a policy with explicit bounds
    pub const fn new(max_retry_count: u32, max_retry_delay: Duration) -> Self {
        Self {
            max_retry_count,
            max_retry_delay,
        }
    }

    /// A policy that never retries
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Whether another attempt is allowed after `retries` retries
    pub fn should_retry(&self, retries: u32) -> bool {
        retries < self.max_retry_count
    }

    /// Backoff before the `retry`th retry with a random jitter factor
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(1.0..Self::MAX_JITTER);
        self.delay_with_jitter(retry, jitter)
    }

    /// Backoff before the `retry`th retry with a fixed jitter factor
    pub fn delay_with_jitter(&self, retry: u32, jitter: f64) -> Duration {
        let exponent = retry.min(31) as i32;
        let base = (2f64.powi(exponent) - 1.0) * Self::COEFFICIENT.as_secs_f64() * jitter;
        let capped = base.min(self.max_retry_delay.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }
}
