use std::time::Duration;

use tokio_retry2::strategy::ExponentialBackoff;

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// Waits between attempts; after the failed 1-based attempt `n` the wait
    /// is `backoff_unit * 2^n`
    pub fn strategy(&self) -> impl Iterator<Item = Duration> {
        let unit_ms = u64::try_from(self.backoff_unit.as_millis()).unwrap_or(u64::MAX);
        ExponentialBackoff::from_millis(2)
            .factor(unit_ms)
            .take(self.max_attempts.saturating_sub(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(4, Duration::from_secs(1));

        assert_eq!(
            policy.strategy().collect::<Vec<_>>(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8)
            ]
        );
    }

    #[test]
    fn test_backoff_unit_scales_delays() {
        let policy = RetryPolicy::new(3, Duration::from_millis(250));

        assert_eq!(
            policy.strategy().collect::<Vec<_>>(),
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);

        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.strategy().count(), 0);
    }
}
