//! Retry delay policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff settings for delivery retries.
///
/// The delay before retry *k* (1-based) is
/// `min(base_delay_secs * factor^(k-1), max_delay_secs)`, saturating
/// instead of overflowing for extreme settings. `max_retries` counts
/// retries after the initial attempt, so a delivery makes at most
/// `1 + max_retries` transport calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay before the first retry, in seconds.
    pub base_delay_secs: u64,
    /// Multiplier applied per further retry.
    pub factor: u32,
    /// Ceiling on any single delay, in seconds.
    pub max_delay_secs: u64,
    /// Retries permitted after the initial attempt.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay_secs: 60,
            factor: 2,
            max_delay_secs: 3_600,
            max_retries: 3,
        }
    }
}

impl RetryPolicy {
    /// Returns the delay before retry `retry` (1-based). Retry 0 is the
    /// initial attempt and has no delay.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let scaled = u64::from(self.factor)
            .checked_pow(retry - 1)
            .and_then(|multiplier| self.base_delay_secs.checked_mul(multiplier))
            .unwrap_or(u64::MAX);
        Duration::from_secs(scaled.min(self.max_delay_secs))
    }

    /// Returns the full delay schedule, one entry per permitted retry.
    #[must_use]
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_retries)
            .map(|retry| self.delay_for_retry(retry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(schedule: &[Duration]) -> Vec<u64> {
        schedule.iter().map(Duration::as_secs).collect()
    }

    #[test]
    fn default_schedule_doubles_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(secs(&policy.schedule()), vec![60, 120, 240]);
    }

    #[test]
    fn initial_attempt_has_no_delay() {
        assert_eq!(RetryPolicy::default().delay_for_retry(0), Duration::ZERO);
    }

    #[test]
    fn delays_are_capped() {
        let policy = RetryPolicy {
            max_retries: 8,
            ..RetryPolicy::default()
        };
        let schedule = secs(&policy.schedule());
        assert_eq!(schedule, vec![60, 120, 240, 480, 960, 1920, 3600, 3600]);
    }

    #[test]
    fn extreme_settings_saturate_at_the_cap() {
        let policy = RetryPolicy {
            base_delay_secs: u64::MAX,
            factor: u32::MAX,
            max_delay_secs: 10,
            max_retries: 64,
        };
        for delay in policy.schedule() {
            assert_eq!(delay, Duration::from_secs(10));
        }
    }

    #[test]
    fn factor_one_keeps_delays_constant() {
        let policy = RetryPolicy {
            base_delay_secs: 30,
            factor: 1,
            max_delay_secs: 3_600,
            max_retries: 4,
        };
        assert_eq!(secs(&policy.schedule()), vec![30, 30, 30, 30]);
    }

    #[test]
    fn zero_retries_means_empty_schedule() {
        let policy = RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        };
        assert!(policy.schedule().is_empty());
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let policy: RetryPolicy = toml::from_str("").unwrap();
        assert_eq!(policy.base_delay_secs, 60);
        assert_eq!(policy.max_retries, 3);

        let policy: RetryPolicy = toml::from_str("base_delay_secs = 5\nmax_retries = 1").unwrap();
        assert_eq!(secs(&policy.schedule()), vec![5]);
    }
}
