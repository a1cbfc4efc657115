//! Exponential backoff for unauthenticated requests.
//!
//! Anonymous reads go through [`send_with_retry`], which retries network
//! failures and non-2xx responses, doubling the wait each time. Authenticated
//! requests bypass this: the auth transport owns its retry policy.

use std::time::Duration;

use crate::clients::errors::HttpError;
use crate::clients::http_request::TransportRequest;
use crate::clients::http_response::TransportResponse;
use crate::clients::transport::Transport;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default wait before the first retry.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(300);

/// Retry budget and backoff schedule.
///
/// The wait before retry `n` (zero-based) is `initial_backoff * 2^n`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use storefront_client::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 6);
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(300));
/// assert_eq!(policy.delay_for_retry(4), Duration::from_millis(4800));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given budget and initial backoff.
    #[must_use]
    pub const fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// A policy that sends exactly once.
    #[must_use]
    pub const fn no_retries() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Returns the number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the total number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns the wait before the first retry.
    #[must_use]
    pub const fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Returns the wait before retry `retry` (zero-based).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        2_u32
            .checked_pow(retry)
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_INITIAL_BACKOFF)
    }
}

/// Sends `request`, retrying failures according to `policy`.
///
/// A 2xx response on any attempt is returned immediately. Network errors and
/// non-2xx responses are retried until the budget is spent, after which the
/// last failure is returned; a final non-2xx response becomes
/// [`HttpError::Status`]. A request reqwest refuses to build is returned
/// after the first attempt.
///
/// # Errors
///
/// Returns the last [`HttpError`] once all attempts have failed.
pub async fn send_with_retry(
    transport: &dyn Transport,
    url: &str,
    request: &TransportRequest,
    policy: &RetryPolicy,
) -> Result<TransportResponse, HttpError> {
    let mut retry: u32 = 0;
    loop {
        let error = match transport.fetch(url, request).await {
            Ok(response) if response.is_ok() => return Ok(response),
            Ok(response) => HttpError::Status(response.status_error()),
            // Never reached the network; another attempt fails the same way
            Err(HttpError::Network(error)) if error.is_builder() => {
                return Err(HttpError::Network(error));
            }
            Err(error) => error,
        };

        if retry >= policy.max_retries() {
            return Err(error);
        }

        let delay = policy.delay_for_retry(retry);
        retry += 1;
        tracing::warn!(
            "Request to {} failed ({}), retry {}/{} in {:?}",
            url,
            error,
            retry,
            policy.max_retries(),
            delay
        );
        tokio::time::sleep(delay).await;
    }
}
