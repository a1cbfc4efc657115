//! GraphQL client for the Saleor API.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: Executes typed operations (`execute`) and raw documents (`execute_raw`)
//! - [`GraphqlError`]: Error type for GraphQL operations
//! - [`GraphqlResponseError`]: The `errors` of a GraphQL envelope
//!
//! # Response Envelope
//!
//! A GraphQL-over-HTTP response body is either `{"data": ...}` or
//! `{"errors": [{"message": ...}, ...]}`. The client checks for `errors`
//! first: when present the call fails with [`GraphqlError::Graphql`] even
//! though the HTTP status was 200, and no partial data is returned.
//!
//! # Retry Behavior
//!
//! Anonymous requests (`with_auth: false`) are retried with exponential
//! backoff on network errors and non-2xx responses, per the client's
//! [`RetryPolicy`](crate::RetryPolicy). Authenticated requests are sent once
//! through the auth provider's transport, which applies its own policy.

mod client;
mod errors;

pub use client::{GraphqlClient, CLIENT_VERSION};
pub use errors::{GraphqlError, GraphqlErrorMessage, GraphqlResponseError};
