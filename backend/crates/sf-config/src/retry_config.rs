use crate::{ConfigError, ConfigErrorResult};

use std::fmt::Display;

use serde::Deserialize;

pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const MIN_INITIAL_DELAY_MS: u64 = 10;
pub const MAX_INITIAL_DELAY_MS: u64 = 10_000;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 250;

pub const MIN_MAX_DELAY_SECS: u64 = 1;
pub const MAX_MAX_DELAY_SECS: u64 = 60;
pub const DEFAULT_MAX_DELAY_SECS: u64 = 5;

pub const MIN_BACKOFF_MULTIPLIER: f64 = 1.0;
pub const MAX_BACKOFF_MULTIPLIER: f64 = 10.0;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

pub const DEFAULT_JITTER: bool = true;

/// Backoff policy applied by the reconciler around identity provider lookups.
///
/// The lookup itself never retries; transient provider failures are retried
/// here, at the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_secs: u64,
    /// Delay multiplier between consecutive attempts
    pub backoff_multiplier: f64,
    /// Randomize each delay by 0.5x-1.5x
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "retry.max_attempts",
            self.max_attempts,
            MIN_MAX_ATTEMPTS,
            MAX_MAX_ATTEMPTS,
        )?;
        check_range(
            "retry.initial_delay_ms",
            self.initial_delay_ms,
            MIN_INITIAL_DELAY_MS,
            MAX_INITIAL_DELAY_MS,
        )?;
        check_range(
            "retry.max_delay_secs",
            self.max_delay_secs,
            MIN_MAX_DELAY_SECS,
            MAX_MAX_DELAY_SECS,
        )?;
        check_range(
            "retry.backoff_multiplier",
            self.backoff_multiplier,
            MIN_BACKOFF_MULTIPLIER,
            MAX_BACKOFF_MULTIPLIER,
        )?;

        if self.initial_delay_ms > self.max_delay_secs * 1000 {
            return Err(ConfigError::retry(format!(
                "retry.initial_delay_ms ({}) exceeds retry.max_delay_secs ({}s)",
                self.initial_delay_ms, self.max_delay_secs
            )));
        }

        Ok(())
    }
}

#[track_caller]
fn check_range<T: PartialOrd + Display>(name: &str, value: T, min: T, max: T) -> ConfigErrorResult<()> {
    // NaN fails both comparisons, so test for containment rather than exclusion
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::retry(format!(
            "{} must be {}-{}, got {}",
            name, min, max, value
        )))
    }
}
