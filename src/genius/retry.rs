//! Bounded retry around the transport.
//!
//! This is the only place retry and backoff live; everything above calls
//! through [`RetryPolicy::fetch`] and never retries on its own.
//!
//! - rate limited: fixed delay, then retry
//! - server or network error: `base_delay * 2^attempt`, then retry
//! - client error: fatal immediately
//!
//! After `max_retries` retries the last error is returned.

use std::time::Duration;

use serde_json::Value;

use super::domain::GeniusError;
use super::traits::{GeniusTransport, Outcome};

/// Retry/backoff parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait after a 429
    pub rate_limit_delay: Duration,
    /// Base of the exponential backoff for 5xx and network errors
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            rate_limit_delay: Duration::from_millis(5000),
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after `outcome` on zero-based `attempt`, or
    /// `None` when the outcome is final.
    pub fn delay_for(&self, outcome: &Outcome, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        match outcome {
            Outcome::RateLimited => Some(self.rate_limit_delay),
            Outcome::ServerError { .. } | Outcome::NetworkError(_) => {
                Some(self.base_delay.saturating_mul(2u32.saturating_pow(attempt)))
            }
            Outcome::Success(_) | Outcome::ClientError { .. } => None,
        }
    }

    /// Request `endpoint`, retrying per policy.
    pub async fn fetch(
        &self,
        transport: &dyn GeniusTransport,
        endpoint: &str,
    ) -> Result<Value, GeniusError> {
        let mut attempt = 0;
        loop {
            let outcome = transport.request(endpoint, attempt).await;

            let Some(wait) = self.delay_for(&outcome, attempt) else {
                return outcome.into_result().inspect_err(|e| {
                    tracing::error!(
                        endpoint,
                        attempt = attempt + 1,
                        error = %e,
                        "Genius API request failed"
                    );
                });
            };

            match &outcome {
                Outcome::RateLimited => tracing::info!(
                    endpoint,
                    wait_ms = wait.as_millis() as u64,
                    "Rate limit hit, waiting before retry"
                ),
                other => tracing::warn!(
                    endpoint,
                    wait_ms = wait.as_millis() as u64,
                    outcome = ?other,
                    "Transient upstream failure, waiting before retry"
                ),
            }

            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }
}
