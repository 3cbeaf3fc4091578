use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{backoff::Backoff, FetchError, Result};

/// Configures how many times a request is retried and how long to wait in between.
///
/// Deserializes from camelCase keys (`maxRetries`, `initialDelayMs`, ...);
/// any key left out takes its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound for any later delay in milliseconds.
    pub max_delay_ms: u64,
    /// Factor applied to the delay after each retry. Must be greater than 1.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1_000,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Preset for outbound notifications (chat messages, webhooks).
    pub fn notification() -> Self {
        Self {
            initial_delay_ms: 500,
            ..Self::default()
        }
    }

    /// Preset for reading data from third-party APIs.
    pub fn data_fetch() -> Self {
        Self::default()
    }

    /// A single attempt with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Checks that delays are positive and the multiplier actually grows the delay.
    pub fn validate(&self) -> Result<()> {
        if self.initial_delay_ms == 0 {
            return Err(FetchError::InvalidConfig(
                "initial_delay_ms must be positive".to_owned(),
            ));
        }
        if self.max_delay_ms == 0 {
            return Err(FetchError::InvalidConfig(
                "max_delay_ms must be positive".to_owned(),
            ));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier <= 1.0 {
            return Err(FetchError::InvalidConfig(format!(
                "backoff_multiplier must be a finite number greater than 1, got {}",
                self.backoff_multiplier
            )));
        }
        Ok(())
    }

    /// Returns the waits between attempts, one per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        Backoff::new(self).take(self.max_retries as usize)
    }

    /// Worst-case total time spent waiting if every retry is used.
    ///
    /// Saturates at `Duration::MAX`.
    pub fn max_total_delay(&self) -> Duration {
        self.delays()
            .fold(Duration::ZERO, |total, delay| total.saturating_add(delay))
    }
}
