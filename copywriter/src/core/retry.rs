//! Bounded exponential backoff for provider calls
//!
//! One logical call is attempted at most `max_attempts` times. Only failures
//! classified as transient (overload, rate limiting, unavailability) are
//! retried; everything else surfaces after the first attempt.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use shared::{ProcessId, process_debug, process_error, process_warn};
use tokio_util::sync::CancellationToken;

use crate::error::{CopywriterError, CopywriterResult};
use crate::types::ProviderError;

/// Total attempts per invocation (1 initial + 4 retries)
pub const MAX_ATTEMPTS: u32 = 5;
pub const BASE_DELAY_MS: u64 = 500;
/// Jitter is drawn uniformly from `[0, MAX_JITTER_MS)`
pub const MAX_JITTER_MS: u64 = 250;

const RETRIABLE_STATUSES: [u16; 2] = [503, 429];
const RETRIABLE_MARKERS: [&str; 3] = ["overloaded", "unavailable", "rate limit"];

/// Retry budget and backoff shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: Duration::from_millis(BASE_DELAY_MS),
            max_jitter: Duration::from_millis(MAX_JITTER_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_jitter,
        }
    }

    /// Deterministic part of the delay before `attempt` (0-indexed)
    ///
    /// Attempt 0 is the initial call and never waits; attempt n waits
    /// `base_delay * 2^(n-1)`.
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Full delay before `attempt`, including random jitter
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.base_delay_for(attempt).saturating_add(self.jitter())
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
    }
}

/// Classify a provider failure as transient
///
/// Retriable when the status (or a numeric code) is 503 or 429, or when the
/// message mentions overload, unavailability or rate limiting.
pub fn is_retriable_error(error: &ProviderError) -> bool {
    let numeric_code = error.code.as_deref().and_then(|c| c.trim().parse::<u16>().ok());
    if [error.status, numeric_code]
        .into_iter()
        .flatten()
        .any(|status| RETRIABLE_STATUSES.contains(&status))
    {
        return true;
    }

    let message = error.message.to_lowercase();
    RETRIABLE_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Run `call` under the retry policy
///
/// `call` receives the 0-indexed attempt number. Cancellation is checked
/// before every attempt and interrupts backoff sleeps, but never an attempt
/// that is already in flight.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancellation: Option<&CancellationToken>,
    mut call: F,
) -> CopywriterResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if cancellation.is_some_and(|token| token.is_cancelled()) {
            return Err(CopywriterError::Cancelled);
        }

        let error = match call(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    process_debug!(ProcessId::current(), "Provider call succeeded on attempt {}/{}", attempt + 1, max_attempts);
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !is_retriable_error(&error) {
            process_error!(
                ProcessId::current(),
                status = ?error.status,
                "❌ Provider request failed with non-retriable error: {}",
                error
            );
            return Err(CopywriterError::Provider(error));
        }

        if attempt + 1 >= max_attempts {
            process_error!(
                ProcessId::current(),
                status = ?error.status,
                "❌ Provider still overloaded after {} attempts: {}",
                max_attempts,
                error
            );
            return Err(CopywriterError::Overloaded {
                attempts: max_attempts,
                last_error: error,
            });
        }

        attempt += 1;
        let delay = policy.backoff_delay(attempt);
        process_warn!(
            ProcessId::current(),
            attempt,
            delay_ms = delay.as_millis() as u64,
            "⏳ Provider request failed (attempt {}/{}), retrying in {}ms: {}",
            attempt,
            max_attempts,
            delay.as_millis(),
            error
        );

        match cancellation {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => return Err(CopywriterError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            None => tokio::time::sleep(delay).await,
        }
    }
}
