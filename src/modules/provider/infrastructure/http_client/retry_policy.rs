//! Retry policies for the metadata and recommendation upstreams
//!
//! A policy is a plain value object; `RetryUtil::with_retry` consumes it so
//! both clients share one retry loop.

use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Multiplier applied per additional failed attempt
    pub backoff_factor: f64,
    /// Cap applied before jitter
    pub max_delay: Duration,
    /// Upper bound of the random delay added on top
    pub jitter: Duration,
}

impl RetryPolicy {
    /// AniList: a single retry two seconds after an HTTP 500
    pub fn anilist() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(2),
            backoff_factor: 1.0,
            max_delay: Duration::from_secs(2),
            jitter: Duration::ZERO,
        }
    }

    /// Recommendation proxy: three attempts, 500ms * 1.5^n capped at 1.5s, up to 200ms jitter
    pub fn recommendations() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            backoff_factor: 1.5,
            max_delay: Duration::from_millis(1500),
            jitter: Duration::from_millis(200),
        }
    }

    /// Delay before the next attempt, given the 1-based number of the attempt that failed.
    /// Excludes jitter.
    pub fn backoff_delay(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1) as i32;
        let millis = self.base_delay.as_millis() as f64 * self.backoff_factor.powi(exponent);
        Duration::from_millis(millis as u64).min(self.max_delay)
    }

    fn delay_with_jitter(&self, failed_attempt: u32) -> Duration {
        let delay = self.backoff_delay(failed_attempt);
        if self.jitter.is_zero() {
            return delay;
        }
        let jitter_ms = (self.jitter.as_millis() as f64 * rand::random::<f64>()) as u64;
        delay + Duration::from_millis(jitter_ms)
    }
}

/// Retry utility shared by every upstream client
pub struct RetryUtil;

impl RetryUtil {
    /// Run `operation` until it succeeds, the error is not retryable, or the
    /// policy's attempts are used up. The operation receives the 1-based attempt number.
    pub async fn with_retry<F, Fut, T, R>(
        policy: &RetryPolicy,
        operation_name: &str,
        is_retryable: R,
        mut operation: F,
    ) -> AppResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AppResult<T>>,
        R: Fn(&AppError) -> bool,
    {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", operation_name, attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !is_retryable(&error) {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                        return Err(error);
                    }

                    if attempt >= max_attempts {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name, attempt, error
                        );
                        return Err(error);
                    }

                    let delay = policy.delay_with_jitter(attempt);
                    warn!(
                        "{} failed on attempt {}/{} ({}), retrying in {:?}",
                        operation_name, attempt, max_attempts, error, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
