//! Error types for the storefront client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Configuration is validated once, when the
//! [`StorefrontConfig`](crate::StorefrontConfig) is built, so a client can
//! never be created without a usable endpoint.
//!
//! # Example
//!
//! ```rust
//! use storefront_client::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL cannot be empty.
    #[error("API URL cannot be empty. Please provide the GraphQL endpoint of your Saleor instance.")]
    EmptyApiUrl,

    /// The API URL is not a valid http(s) URL.
    #[error("Invalid API URL '{url}'. Expected an absolute http or https URL (e.g., 'https://example.saleor.cloud/graphql/').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// None of the environment variables naming the API URL are set.
    #[error("Missing API URL. Set one of the following environment variables: {}.", .variables.join(", "))]
    MissingApiUrl {
        /// The variables that were consulted, in lookup order.
        variables: Vec<&'static str>,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
