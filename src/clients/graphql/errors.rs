//! GraphQL-specific error types.
//!
//! - [`GraphqlError::Http`]: Transport failure or non-2xx response
//! - [`GraphqlError::Graphql`]: 2xx response whose envelope carries `errors`
//! - [`GraphqlError::Config`]: Invalid or missing configuration
//! - [`GraphqlError::Auth`]: No authenticated transport could be obtained
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_client::clients::graphql::GraphqlError;
//!
//! match client.execute(&ProductList, &variables, options).await {
//!     Ok(data) => render(data),
//!     Err(GraphqlError::Graphql(e)) => {
//!         for error in &e.errors {
//!             eprintln!("{}", error.message);
//!         }
//!     }
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::error::ConfigError;

/// A single entry of a GraphQL `errors` array.
///
/// Fields other than `message` (`locations`, `path`, `extensions`) are kept
/// verbatim in `extra`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphqlErrorMessage {
    /// The error message. Empty when the server omitted it.
    #[serde(default)]
    pub message: String,
    /// Any other fields of the error object.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The `errors` of a GraphQL response, with their messages joined by newlines.
///
/// # Example
///
/// ```rust
/// use storefront_client::clients::graphql::{GraphqlErrorMessage, GraphqlResponseError};
///
/// let error = GraphqlResponseError::new(vec![
///     GraphqlErrorMessage { message: "first".to_string(), extra: Default::default() },
///     GraphqlErrorMessage { message: "second".to_string(), extra: Default::default() },
/// ]);
///
/// assert_eq!(error.to_string(), "first\nsecond");
/// assert_eq!(error.errors.len(), 2);
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct GraphqlResponseError {
    /// The newline-joined messages.
    pub message: String,
    /// The original error list.
    pub errors: Vec<GraphqlErrorMessage>,
}

impl GraphqlResponseError {
    /// Creates the error, joining the messages of `errors`.
    #[must_use]
    pub fn new(errors: Vec<GraphqlErrorMessage>) -> Self {
        let message = errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { message, errors }
    }
}

/// Error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Network failure or non-2xx response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response envelope contained `errors`.
    #[error(transparent)]
    Graphql(#[from] GraphqlResponseError),

    /// The client configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An authenticated transport could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The operation variables could not be serialized.
    #[error("Failed to serialize GraphQL variables: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body was not valid JSON or did not match the result shape.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A 2xx response carried neither `data` nor `errors`.
    #[error("GraphQL response contained neither `data` nor `errors`")]
    MissingData,

    /// A caller-supplied header cannot be sent. Raised before any attempt.
    #[error("Invalid request header '{name}'. Header names must be valid HTTP tokens and values must not contain control characters.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

impl GraphqlError {
    /// Returns the GraphQL error list if the server reported errors.
    #[must_use]
    pub fn graphql_errors(&self) -> Option<&[GraphqlErrorMessage]> {
        match self {
            Self::Graphql(e) => Some(&e.errors),
            _ => None,
        }
    }
}
