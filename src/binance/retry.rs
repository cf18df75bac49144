//! Retry policy for outbound requests
//!
//! Bounded attempts with linear backoff (1x, 2x, 3x the base delay).
//! Only faults the policy classifies as retryable are attempted again.

use crate::error::FaultKind;
use std::future::Future;
use std::time::Duration;

/// Failure that can be classified for retry purposes
pub trait Fault {
    fn kind(&self) -> FaultKind;
}

/// Outcome of a failed [`RetryPolicy::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryError<E> {
    /// Attempts made, including the failing one
    pub attempts: u32,
    /// True when the error was retryable but the budget ran out
    pub exhausted: bool,
    /// Last observed error
    pub last: E,
}

/// Attempt budget, backoff schedule and retryable-fault predicate
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    retryable: fn(FaultKind) -> bool,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Policy retrying transient faults; `max_attempts` is clamped to at least 1
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            retryable: |kind| kind.is_transient(),
        }
    }

    /// Replaces the predicate deciding which fault kinds are retried
    pub fn retry_on(mut self, retryable: fn(FaultKind) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Sleep after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    pub fn is_retryable(&self, kind: FaultKind) -> bool {
        (self.retryable)(kind)
    }

    /// Runs `operation` until it succeeds, fails fatally, or the budget is spent
    ///
    /// `operation` receives the 1-based attempt number. `on_retry` is called
    /// with the failed attempt number, its error and the upcoming delay right
    /// before each backoff sleep.
    pub async fn run<T, E, F, Fut, R>(
        &self,
        mut operation: F,
        mut on_retry: R,
    ) -> Result<T, RetryError<E>>
    where
        E: Fault,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: FnMut(u32, &E, Duration),
    {
        let mut attempt = 1;
        loop {
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.is_retryable(error.kind()) {
                return Err(RetryError {
                    attempts: attempt,
                    exhausted: false,
                    last: error,
                });
            }
            if attempt >= self.max_attempts {
                return Err(RetryError {
                    attempts: attempt,
                    exhausted: true,
                    last: error,
                });
            }

            let delay = self.delay_for(attempt);
            on_retry(attempt, &error, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BASE_DELAY)
    }
}
