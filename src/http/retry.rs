//! Retries for transient server and transport failures.
//!
//! Rate limits are never retried at this layer: they surface as
//! [`HttpError::RateLimited`](crate::error::HttpError::RateLimited) so the
//! fetcher can apply its own cooldown at the same page boundary.

use rand::Rng;
use std::time::Duration;

/// Gateway and availability statuses that usually clear on their own.
pub const RETRYABLE_STATUSES: [u16; 3] = [502, 503, 504];

/// Whether, and how, a GET is repeated after a transient failure.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    #[default]
    None,
    /// [`RetryConfig::idempotent`].
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(config) => Some(config.clone()),
        }
    }
}

/// Doubling backoff between attempts, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Spread each delay by up to a quarter either way.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }

    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Wait before retry number `retry` (0 for the first retry).
    pub fn delay_before(&self, retry: u32) -> Duration {
        let doubled = self
            .initial_delay
            .saturating_mul(1u32.checked_shl(retry).unwrap_or(u32::MAX));
        let delay = doubled.min(self.max_delay);
        if !self.jitter {
            return delay;
        }
        let spread = rand::thread_rng().gen_range(0.75..=1.25);
        delay.mul_f64(spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_none_has_no_config() {
        assert!(RetryPolicy::default().config().is_none());
        assert_eq!(RetryPolicy::Idempotent.config().unwrap().max_retries, 3);
    }

    #[test]
    fn test_rate_limits_not_retryable() {
        assert!(!RetryConfig::is_retryable_status(429));
        assert!(!RetryConfig::is_retryable_status(418));
        assert!(!RetryConfig::is_retryable_status(500));
        assert!(RetryConfig::is_retryable_status(503));
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            jitter: false,
            ..RetryConfig::idempotent()
        };
        assert_eq!(config.delay_before(0), Duration::from_millis(100));
        assert_eq!(config.delay_before(1), Duration::from_millis(200));
        assert_eq!(config.delay_before(2), Duration::from_millis(350));
        assert_eq!(config.delay_before(40), Duration::from_millis(350));
    }

    #[test]
    fn test_jitter_within_a_quarter() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(1000),
            ..RetryConfig::idempotent()
        };
        for _ in 0..50 {
            let ms = config.delay_before(0).as_millis();
            assert!((750..=1250).contains(&ms), "delay {ms} outside jitter range");
        }
    }
}
