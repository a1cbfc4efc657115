//! HTTP-specific error types for the storefront client.
//!
//! - [`HttpStatusError`]: A non-2xx HTTP response from the API
//! - [`HttpError`]: Unified error type encompassing all transport-level failures
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_client::clients::HttpError;
//!
//! match transport.fetch(url, &request).await {
//!     Ok(response) => println!("Status: {}", response.status),
//!     Err(HttpError::Status(e)) => println!("API error {}: {}", e.code, e.status_text),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(HttpError::Transport { message }) => println!("Transport error: {}", message),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API answers with a non-2xx status.
///
/// # Example
///
/// ```rust
/// use storefront_client::clients::HttpStatusError;
///
/// let error = HttpStatusError {
///     code: 503,
///     status_text: "Service Unavailable".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP error 503: Service Unavailable");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP error {code}: {status_text}")]
pub struct HttpStatusError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The status text (reason phrase) of the response.
    pub status_text: String,
}

/// Unified error type for transport-level failures.
///
/// Only these failures are retried, and only on the unauthenticated path.
/// GraphQL-level errors (HTTP 200 with an `errors` envelope) are reported as
/// [`GraphqlError::Graphql`](crate::clients::graphql::GraphqlError::Graphql)
/// and never retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx HTTP response.
    #[error(transparent)]
    Status(#[from] HttpStatusError),

    /// Network or connection error raised by the reqwest transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`](crate::clients::Transport)
    /// implementation.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },
}

impl HttpError {
    /// Returns the status error if this failure was a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<&HttpStatusError> {
        match self {
            Self::Status(e) => Some(e),
            _ => None,
        }
    }
}
