use std::time::Duration;

use crate::RetryConfig;

/// Exponential delay schedule with an upper bound.
///
/// Each call yields the current delay and then grows it by the multiplier,
/// clamped to the configured maximum. The first delay is returned as configured.
/// The schedule is kept in fractional milliseconds so small delays still grow.
#[derive(Clone, Debug)]
pub struct Backoff {
    next_ms: f64,
    max_ms: f64,
    multiplier: f64,
}

impl Backoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            next_ms: config.initial_delay_ms as f64,
            max_ms: config.max_delay_ms as f64,
            multiplier: config.backoff_multiplier,
        }
    }

    /// Returns the delay to wait now and advances the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.next_ms;
        self.next_ms = (current * self.multiplier).min(self.max_ms);
        // Fractions carry over between steps; only the sleep is rounded.
        Duration::from_millis(current.round() as u64)
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::Backoff;
    use crate::RetryConfig;

    fn millis(backoff: Backoff, n: usize) -> Vec<u128> {
        backoff.take(n).map(|d| d.as_millis()).collect()
    }

    #[test]
    fn doubles_until_cap() {
        let config = RetryConfig {
            initial_delay_ms: 1_000,
            max_delay_ms: 3_000,
            backoff_multiplier: 2.0,
            ..RetryConfig::default()
        };
        assert_eq!(
            millis(Backoff::new(&config), 4),
            vec![1_000, 2_000, 3_000, 3_000]
        );
    }

    #[test]
    fn default_config_reaches_ten_second_cap() {
        assert_eq!(
            millis(Backoff::new(&RetryConfig::default()), 6),
            vec![1_000, 2_000, 4_000, 8_000, 10_000, 10_000]
        );
    }

    #[test]
    fn fractional_multiplier_rounds_only_the_output() {
        let config = RetryConfig {
            initial_delay_ms: 100,
            max_delay_ms: 1_000,
            backoff_multiplier: 1.5,
            ..RetryConfig::default()
        };
        assert_eq!(millis(Backoff::new(&config), 4), vec![100, 150, 225, 338]);
    }

    #[test]
    fn one_millisecond_start_keeps_growing() {
        let config = RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 10_000,
            backoff_multiplier: 1.5,
            ..RetryConfig::default()
        };
        let schedule = millis(Backoff::new(&config), 6);
        assert_eq!(schedule, vec![1, 2, 2, 3, 5, 8]);
        assert!(schedule[5] > schedule[0]);
    }

    #[test]
    fn initial_delay_above_cap_is_used_once() {
        let config = RetryConfig {
            initial_delay_ms: 5_000,
            max_delay_ms: 2_000,
            backoff_multiplier: 2.0,
            ..RetryConfig::default()
        };
        assert_eq!(millis(Backoff::new(&config), 3), vec![5_000, 2_000, 2_000]);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let config = RetryConfig {
            initial_delay_ms: u64::MAX / 2,
            max_delay_ms: u64::MAX,
            backoff_multiplier: 10.0,
            ..RetryConfig::default()
        };
        let mut backoff = Backoff::new(&config);
        backoff.next_delay();
        backoff.next_delay();
        assert!(backoff.next_delay().as_millis() > 0);
    }
}
