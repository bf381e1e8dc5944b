//! Retry logic with exponential backoff
//!
//! The executor holds only its policy, so one client can drive any number of
//! concurrent calls without them queueing behind each other:
//! - Exponential backoff capped at `max_delay`, with up to 10% jitter
//! - `Retry-After` from the server is honoured when it asks for longer
//! - Per-attempt timeout plus an overall deadline

use crate::error::{OpenAIError, OpenAIResult};
use crate::logging::{log_debug, log_error};

use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Retry policy configuration for API requests
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum total operation time
    pub total_timeout: Duration,
    /// Request timeout for individual attempts
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(16),
            backoff_multiplier: 2.0,
            total_timeout: Duration::from_secs(300),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    /// Default timings with `max_retries` additional attempts after the first.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_attempts: max_retries.saturating_add(1),
            ..Self::default()
        }
    }
}

/// Retry executor that handles exponential backoff
#[derive(Debug, Clone, Default)]
pub(crate) struct RetryExecutor {
    pub(crate) policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor with the given policy
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Run `operation` until it succeeds, fails permanently, or the policy is exhausted
    pub async fn execute<F, Fut, T>(&self, operation: F) -> OpenAIResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = OpenAIResult<T>>,
    {
        let start_time = Instant::now();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            if start_time.elapsed() >= self.policy.total_timeout {
                return Err(OpenAIError::timeout(self.policy.total_timeout.as_secs()));
            }

            attempt += 1;
            log_debug!(attempt = attempt, max_attempts = max_attempts, "Executing request attempt");

            let attempt_start = Instant::now();
            let error = match tokio::time::timeout(self.policy.request_timeout, operation()).await {
                Ok(Ok(response)) => {
                    log_debug!(
                        attempt = attempt,
                        duration_ms = attempt_start.elapsed().as_millis(),
                        "Request succeeded"
                    );
                    return Ok(response);
                }
                Ok(Err(error)) => error,
                Err(_elapsed) => OpenAIError::timeout(self.policy.request_timeout.as_secs()),
            };

            if !error.is_retryable() || attempt >= max_attempts {
                return Err(self.give_up(attempt, error, &start_time));
            }

            let delay = self.delay_for(attempt, &error);
            log_debug!(
                attempt = attempt,
                max_attempts = max_attempts,
                delay_ms = delay.as_millis(),
                error = %error,
                "Request failed, retrying after delay"
            );
            sleep(delay).await;
        }
    }

    fn give_up(&self, attempt: u32, error: OpenAIError, start_time: &Instant) -> OpenAIError {
        if attempt > 1 {
            log_error!(
                attempts = attempt,
                total_duration_ms = start_time.elapsed().as_millis(),
                error = %error,
                "Request failed after all retry attempts"
            );
        }
        error
    }

    /// Backoff delay, stretched to the server's `Retry-After` when that is longer
    pub(crate) fn delay_for(&self, attempt: u32, error: &OpenAIError) -> Duration {
        let backoff = self.calculate_delay(attempt);
        match error.retry_after_seconds() {
            Some(seconds) => backoff.max(Duration::from_secs(seconds).min(self.policy.max_delay)),
            None => backoff,
        }
    }

    /// Calculate delay for exponential backoff
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay_seconds = self.policy.initial_delay.as_secs_f64()
            * self.policy.backoff_multiplier.powi(exponent);

        let capped = delay_seconds.min(self.policy.max_delay.as_secs_f64());
        let delay = Duration::try_from_secs_f64(capped).unwrap_or(self.policy.max_delay);

        // Up to 10% jitter
        let jitter = fastrand::f64() * 0.1;
        Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter)).unwrap_or(delay)
    }
}
