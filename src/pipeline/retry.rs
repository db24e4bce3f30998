use std::{future::Future, time::Duration};

use tokio::time::sleep;

use crate::config;

/// Flat retry policy: up to `max_attempts` tries with a fixed pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

/// Terminal outcome of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T, E> {
    /// `Ok` on success, otherwise the error of the last attempt.
    pub result: Result<T, E>,
    pub attempts: u32,
}

impl<T, E> Settled<T, E> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Calls `operation` until it succeeds or the attempts are used up.
    ///
    /// `operation` receives the 1-based attempt number. Errors of earlier
    /// attempts are dropped; only the terminal outcome is returned.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Settled<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    return Settled {
                        result: Ok(value),
                        attempts: attempt,
                    };
                }
                Err(err) if attempt >= self.max_attempts => {
                    return Settled {
                        result: Err(err),
                        attempts: attempt,
                    };
                }
                Err(_) => {
                    sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(
            config::DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(config::DEFAULT_RETRY_DELAY_MS),
        )
    }
}
