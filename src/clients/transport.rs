//! Plain HTTP transport.
//!
//! This module provides the [`Transport`] trait, the seam through which the
//! GraphQL client sends unauthenticated requests, and [`ReqwestTransport`],
//! its default implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::TransportRequest;
use crate::clients::http_response::TransportResponse;

/// Sends a prepared POST request and returns the raw response.
///
/// Implementations report non-2xx responses as `Ok` responses; only failures
/// to obtain a response at all are errors. Retrying is the caller's concern.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response could be obtained.
    async fn fetch(
        &self,
        url: &str,
        request: &TransportRequest,
    ) -> Result<TransportResponse, HttpError>;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`; cloning it shares the connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport using rustls.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(
        &self,
        url: &str,
        request: &TransportRequest,
    ) -> Result<TransportResponse, HttpError> {
        let mut req_builder = self.client.post(url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        // Caller-supplied Cache-Control wins over the derived one
        if request.header("Cache-Control").is_none() {
            if let Some(cache_control) = request.cache_control() {
                req_builder = req_builder.header("Cache-Control", cache_control);
            }
        }

        let res = req_builder.body(request.body.clone()).send().await?;

        let status = res.status();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!("POST {} responded with {}", url, status);

        Ok(TransportResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
        ))
    }
}
