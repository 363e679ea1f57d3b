use crate::IdpError;

use std::time::Duration;

use tokio::time::sleep;

/// Backoff schedule for retrying transient provider failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in 0.5..1.5
    pub jitter: bool,
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// `delay` scaled by a random factor in 0.5..1.5 when jitter is on.
    pub fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter {
            delay.mul_f64(0.5 + rand::random::<f64>())
        } else {
            delay
        }
    }

    /// The wait after `delay`, grown by the multiplier and capped.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.backoff_multiplier).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&sf_config::RetryConfig::default())
    }
}

impl From<&sf_config::RetryConfig> for RetryPolicy {
    fn from(config: &sf_config::RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `policy.max_attempts` is reached. The last error is returned unchanged.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    what: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    log::info!("{what} succeeded on attempt {attempt}");
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !error.is_retryable() || attempt >= policy.max_attempts {
            log::warn!("{what} gave up after {attempt} attempt(s): {error}");
            return Err(error);
        }

        let wait = policy.jittered(delay);
        log::debug!("{what} attempt {attempt} failed ({error}); next try in {wait:?}");
        sleep(wait).await;

        delay = policy.next_delay(delay);
        attempt += 1;
    }
}

/// Errors that can tell whether a repeat attempt might succeed
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for IdpError {
    /// Transport failures, timeouts, 429 and 5xx are transient. Rejected
    /// credentials and unparseable bodies are not.
    fn is_retryable(&self) -> bool {
        match self {
            IdpError::Http { source, .. } => !source.is_builder(),
            IdpError::Api { status, .. } => *status == 429 || *status >= 500,
            IdpError::Unauthorized { .. }
            | IdpError::Json { .. }
            | IdpError::Configuration { .. } => false,
        }
    }
}
