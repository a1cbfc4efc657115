//! HTTP client types for Saleor API communication.
//!
//! This module provides the layer between the GraphQL client and the network:
//! request preparation, the transport seam, retry logic, and HTTP errors.
//!
//! # Overview
//!
//! - [`graphql::GraphqlClient`]: The GraphQL client
//! - [`Transport`]: Sends a prepared request; [`ReqwestTransport`] is the default
//! - [`RequestOptions`]: Per-call headers, cache directive, revalidation and auth selection
//! - [`TransportRequest`] / [`TransportResponse`]: What transports consume and produce
//! - [`RetryPolicy`]: Exponential backoff for anonymous requests
//! - [`HttpError`]: Transport-level failures
//!
//! # Retry Behavior
//!
//! Anonymous requests are attempted up to `max_retries + 1` times. The wait
//! starts at `initial_backoff` and doubles after every failed attempt:
//!
//! - **Network errors**: retried
//! - **Non-2xx responses**: retried
//! - **GraphQL `errors` on 2xx**: returned immediately
//!
//! The default policy is 5 retries starting at 300ms.

mod errors;
pub mod graphql;
mod http_request;
mod http_response;
mod retry;
mod transport;

pub use errors::{HttpError, HttpStatusError};
pub use http_request::{
    GraphqlRequestBody, RequestCache, RequestOptions, RequestOptionsBuilder, TransportRequest,
};
pub use http_response::TransportResponse;
pub use retry::{send_with_retry, RetryPolicy, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_RETRIES};
pub use transport::{ReqwestTransport, Transport};

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlError};
