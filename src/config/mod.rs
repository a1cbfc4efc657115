//! Configuration types for the storefront client.
//!
//! This module provides the configuration used to construct a
//! [`GraphqlClient`](crate::GraphqlClient).
//!
//! # Overview
//!
//! - [`StorefrontConfig`]: The endpoint, retry policy and user agent settings
//! - [`StorefrontConfigBuilder`]: A builder for constructing [`StorefrontConfig`] instances
//! - [`ApiUrl`]: A validated GraphQL endpoint URL
//!
//! # Environment
//!
//! Storefront deployments configure the endpoint through the environment.
//! Server-side code reads [`SERVER_API_URL_VAR`]; browser bundles only see
//! variables with the public prefix, [`PUBLIC_API_URL_VAR`]. The server-side
//! value wins when both are set.
//!
//! # Example
//!
//! ```rust
//! use storefront_client::{ApiUrl, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .api_url(ApiUrl::new("https://demo.saleor.io/graphql/").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::ApiUrl;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Environment variable holding the API URL for server-side execution.
pub const SERVER_API_URL_VAR: &str = "SALEOR_API_URL";

/// Environment variable holding the API URL exposed to client-side bundles.
pub const PUBLIC_API_URL_VAR: &str = "NEXT_PUBLIC_SALEOR_API_URL";

/// Configuration for the storefront client.
///
/// # Thread Safety
///
/// `StorefrontConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use storefront_client::{ApiUrl, RetryPolicy, StorefrontConfig};
///
/// let config = StorefrontConfig::builder()
///     .api_url(ApiUrl::new("https://demo.saleor.io/graphql/").unwrap())
///     .retry_policy(RetryPolicy::new(3, Duration::from_millis(100)))
///     .user_agent_prefix("MyStore/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.retry_policy().max_retries(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    api_url: ApiUrl,
    retry_policy: RetryPolicy,
    user_agent_prefix: Option<String>,
}

impl StorefrontConfig {
    /// Creates a new builder for constructing a `StorefrontConfig`.
    #[must_use]
    pub fn builder() -> StorefrontConfigBuilder {
        StorefrontConfigBuilder::new()
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiUrl`] if neither
    /// [`SERVER_API_URL_VAR`] nor [`PUBLIC_API_URL_VAR`] is set to a
    /// non-blank value, or [`ConfigError::InvalidApiUrl`] if the value found
    /// is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Loads the configuration using `lookup` to read variables.
    ///
    /// Behaves like [`from_env`](Self::from_env) but takes the variable
    /// source explicitly, which keeps callers and tests independent of the
    /// process environment.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_client::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::from_env_with(|name| match name {
    ///     "NEXT_PUBLIC_SALEOR_API_URL" => Some("https://demo.saleor.io/graphql/".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.api_url().as_ref(), "https://demo.saleor.io/graphql/");
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variables = [SERVER_API_URL_VAR, PUBLIC_API_URL_VAR];
        let (variable, raw) = variables
            .into_iter()
            .filter_map(|name| lookup(name).map(|value| (name, value)))
            .find(|(_, value)| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiUrl {
                variables: variables.to_vec(),
            })?;

        tracing::debug!("Using API URL from {}", variable);
        Self::builder().api_url(ApiUrl::new(raw)?).build()
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the retry policy applied to unauthenticated requests.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify StorefrontConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontConfig>();
};

/// Builder for constructing [`StorefrontConfig`] instances.
///
/// The only required field is `api_url`.
///
/// # Defaults
///
/// - `retry_policy`: [`RetryPolicy::default`] (5 retries, 300ms initial backoff)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct StorefrontConfigBuilder {
    api_url: Option<ApiUrl>,
    retry_policy: Option<RetryPolicy>,
    user_agent_prefix: Option<String>,
}

impl StorefrontConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the retry policy for unauthenticated requests.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`StorefrontConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_url` is not set.
    pub fn build(self) -> Result<StorefrontConfig, ConfigError> {
        let api_url = self
            .api_url
            .ok_or(ConfigError::MissingRequiredField { field: "api_url" })?;

        Ok(StorefrontConfig {
            api_url,
            retry_policy: self.retry_policy.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_api_url() {
        let result = StorefrontConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = StorefrontConfig::builder()
            .api_url(ApiUrl::new("https://demo.saleor.io/graphql/").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.retry_policy(), &RetryPolicy::default());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = StorefrontConfig::builder()
            .api_url(ApiUrl::new("https://demo.saleor.io/graphql/").unwrap())
            .retry_policy(RetryPolicy::new(2, Duration::from_millis(10)))
            .user_agent_prefix("MyStore/1.0")
            .build()
            .unwrap();

        assert_eq!(config.retry_policy().max_retries(), 2);
        assert_eq!(config.user_agent_prefix(), Some("MyStore/1.0"));
    }

    #[test]
    fn test_from_env_prefers_server_side_variable() {
        let config = StorefrontConfig::from_env_with(lookup_from(&[
            (SERVER_API_URL_VAR, "http://saleor-api:8000/graphql/"),
            (PUBLIC_API_URL_VAR, "https://demo.saleor.io/graphql/"),
        ]))
        .unwrap();

        assert_eq!(config.api_url().as_ref(), "http://saleor-api:8000/graphql/");
    }

    #[test]
    fn test_from_env_falls_back_to_public_variable() {
        let config = StorefrontConfig::from_env_with(lookup_from(&[(
            PUBLIC_API_URL_VAR,
            "https://demo.saleor.io/graphql/",
        )]))
        .unwrap();

        assert_eq!(config.api_url().as_ref(), "https://demo.saleor.io/graphql/");
    }

    #[test]
    fn test_from_env_skips_blank_values() {
        let config = StorefrontConfig::from_env_with(lookup_from(&[
            (SERVER_API_URL_VAR, "   "),
            (PUBLIC_API_URL_VAR, "https://demo.saleor.io/graphql/"),
        ]))
        .unwrap();

        assert_eq!(config.api_url().host_name(), "demo.saleor.io");
    }

    #[test]
    fn test_from_env_fails_when_nothing_is_set() {
        let result = StorefrontConfig::from_env_with(lookup_from(&[]));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingApiUrl {
                variables: vec![SERVER_API_URL_VAR, PUBLIC_API_URL_VAR],
            }
        );
    }

    #[test]
    fn test_from_env_rejects_invalid_url() {
        let result =
            StorefrontConfig::from_env_with(lookup_from(&[(SERVER_API_URL_VAR, "saleor-api")]));

        assert!(matches!(result, Err(ConfigError::InvalidApiUrl { .. })));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorefrontConfig>();
    }
}
