//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL
//! operations against a Saleor API.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};

use crate::auth::{AuthError, AuthProvider};
use crate::clients::graphql::{GraphqlError, GraphqlErrorMessage, GraphqlResponseError};
use crate::clients::http_request::{merge_headers, GraphqlRequestBody};
use crate::clients::retry::send_with_retry;
use crate::clients::{
    HttpError, ReqwestTransport, RequestOptions, RetryPolicy, Transport, TransportRequest,
    TransportResponse,
};
use crate::config::{ApiUrl, StorefrontConfig};
use crate::error::ConfigError;
use crate::operation::Operation;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GraphQL client for a Saleor API.
///
/// The client holds the endpoint and retry policy from its
/// [`StorefrontConfig`], a plain [`Transport`] for anonymous requests, and
/// optionally an [`AuthProvider`] for authenticated ones. Calls share no
/// mutable state, so one client can serve any number of concurrent requests.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_client::{GraphqlClient, RequestOptions, StorefrontConfig};
/// use storefront_client::catalog::{ProductList, ProductListVariables};
///
/// let config = StorefrontConfig::from_env()?;
/// let client = GraphqlClient::new(&config, None);
///
/// let variables = ProductListVariables { first: 12, channel: "default-channel".to_string() };
/// let data = client
///     .execute(&ProductList, &variables, RequestOptions::anonymous())
///     .await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    api_url: ApiUrl,
    retry_policy: RetryPolicy,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client sending over a [`ReqwestTransport`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created
    /// (see [`ReqwestTransport::new`]).
    #[must_use]
    pub fn new(config: &StorefrontConfig, auth_provider: Option<Arc<dyn AuthProvider>>) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()), auth_provider)
    }

    /// Creates a client sending anonymous requests over `transport`.
    #[must_use]
    pub fn with_transport(
        config: &StorefrontConfig,
        transport: Arc<dyn Transport>,
        auth_provider: Option<Arc<dyn AuthProvider>>,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Saleor Storefront Client v{CLIENT_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            api_url: config.api_url().clone(),
            retry_policy: *config.retry_policy(),
            default_headers,
            transport,
            auth_provider,
        }
    }

    /// Creates a client from the environment (see [`StorefrontConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no valid API URL is configured. No request
    /// is attempted in that case.
    pub fn from_env(auth_provider: Option<Arc<dyn AuthProvider>>) -> Result<Self, ConfigError> {
        let config = StorefrontConfig::from_env()?;
        Ok(Self::new(&config, auth_provider))
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the retry policy for anonymous requests.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the headers sent with every request unless overridden.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Executes a typed operation and returns its `data`.
    ///
    /// With `options.with_auth` (the default) the request is sent once through
    /// the auth provider's transport. Otherwise it is sent over the plain
    /// transport with exponential backoff on network failures and non-2xx
    /// responses. GraphQL errors are never retried.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for network failures and non-2xx responses
    ///   (after retries, on the anonymous path)
    /// - [`GraphqlError::Graphql`] when the envelope contains `errors`, even on HTTP 200
    /// - [`GraphqlError::Auth`] if no authenticated transport is available
    /// - [`GraphqlError::Serialize`] / [`GraphqlError::Decode`] for (de)serialization failures
    /// - [`GraphqlError::MissingData`] for a 2xx envelope without `data`
    /// - [`GraphqlError::InvalidHeader`] if a caller header cannot be sent; nothing is attempted
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let data = client
    ///     .execute(&ProductList, &variables, RequestOptions::builder().revalidate(60).build())
    ///     .await?;
    /// ```
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
        variables: &O::Variables,
        options: RequestOptions,
    ) -> Result<O::Result, GraphqlError> {
        let variables = serde_json::to_value(variables).map_err(GraphqlError::Serialize)?;
        let data = self
            .execute_raw(operation.document(), variables, options)
            .await?;
        serde_json::from_value(data).map_err(GraphqlError::Decode)
    }

    /// Executes an untyped document and returns the raw `data` value.
    ///
    /// Variables that are `null` or an empty object are omitted from the body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_raw(
        &self,
        query: &str,
        variables: serde_json::Value,
        options: RequestOptions,
    ) -> Result<serde_json::Value, GraphqlError> {
        let request = self.build_request(query, variables, &options)?;
        let url = self.api_url.as_str();

        tracing::debug!(
            "Sending GraphQL request to {} (authenticated: {})",
            url,
            options.with_auth
        );

        let result = if options.with_auth {
            self.send_authenticated(url, &request).await?
        } else {
            send_with_retry(self.transport.as_ref(), url, &request, &self.retry_policy).await
        };

        let response = match result {
            Ok(response) => response,
            Err(HttpError::Status(e)) => {
                tracing::error!(
                    request_body = %request.body,
                    "GraphQL request to {} failed with HTTP {} {}",
                    url,
                    e.code,
                    e.status_text
                );
                return Err(HttpError::Status(e).into());
            }
            Err(e) => return Err(e.into()),
        };

        parse_envelope(&response.body)
    }

    /// Sends once through the auth provider's transport.
    ///
    /// The outer `Result` reports auth failures; the inner one the HTTP outcome.
    async fn send_authenticated(
        &self,
        url: &str,
        request: &TransportRequest,
    ) -> Result<Result<TransportResponse, HttpError>, GraphqlError> {
        let provider = self
            .auth_provider
            .as_ref()
            .ok_or(AuthError::ProviderNotConfigured)?;
        let transport = provider.authenticated_transport().await?;

        Ok(transport
            .fetch_with_auth(url, request)
            .await
            .and_then(|response| {
                if response.is_ok() {
                    Ok(response)
                } else {
                    Err(HttpError::Status(response.status_error()))
                }
            }))
    }

    /// Serializes the body and merges caller headers over the defaults.
    ///
    /// Headers that could never be sent are rejected here, so a caller
    /// mistake is not retried as if it were a network failure.
    fn build_request(
        &self,
        query: &str,
        variables: serde_json::Value,
        options: &RequestOptions,
    ) -> Result<TransportRequest, GraphqlError> {
        let headers = merge_headers(&self.default_headers, &options.headers);
        validate_headers(&headers)?;

        let body = serde_json::to_string(&GraphqlRequestBody::new(query, variables))
            .map_err(GraphqlError::Serialize)?;

        Ok(TransportRequest {
            headers,
            body,
            cache: options.cache,
            revalidate: options.revalidate,
        })
    }
}

/// Checks that every header is a valid HTTP header name and value.
fn validate_headers(headers: &HashMap<String, String>) -> Result<(), GraphqlError> {
    for (name, value) in headers {
        let valid = HeaderName::from_bytes(name.as_bytes()).is_ok()
            && HeaderValue::from_str(value).is_ok();
        if !valid {
            return Err(GraphqlError::InvalidHeader { name: name.clone() });
        }
    }
    Ok(())
}

/// Splits a GraphQL envelope into `data` or a [`GraphqlResponseError`].
///
/// The presence of a non-null `errors` key decides; `data` is not inspected
/// in that case. `"errors": null` counts as absent, so the envelope's `data`
/// is returned. Entries without a `message` still yield
/// [`GraphqlError::Graphql`], with an empty message.
fn parse_envelope(body: &str) -> Result<serde_json::Value, GraphqlError> {
    let envelope: serde_json::Value = serde_json::from_str(body).map_err(GraphqlError::Decode)?;
    let serde_json::Value::Object(mut envelope) = envelope else {
        return Err(GraphqlError::MissingData);
    };

    if let Some(errors) = envelope.remove("errors").filter(|e| !e.is_null()) {
        let errors: Vec<GraphqlErrorMessage> =
            serde_json::from_value(errors).map_err(GraphqlError::Decode)?;
        return Err(GraphqlResponseError::new(errors).into());
    }

    envelope.remove("data").ok_or(GraphqlError::MissingData)
}
