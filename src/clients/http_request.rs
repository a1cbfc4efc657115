//! Request types for the storefront client.
//!
//! This module provides [`RequestOptions`], the per-call knobs a caller can
//! set, and [`TransportRequest`], the fully prepared request handed to a
//! [`Transport`](crate::clients::Transport) or an
//! [`AuthenticatedTransport`](crate::auth::AuthenticatedTransport).

use std::collections::HashMap;

use serde::Serialize;

/// Caching directive passed through to the transport.
///
/// The variants mirror the standard fetch `cache` modes. The reqwest
/// transport has no response cache of its own, so it expresses these as a
/// `Cache-Control` request header for caches between it and the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestCache {
    /// Let the transport decide.
    #[default]
    Default,
    /// Never store or reuse a cached response.
    NoStore,
    /// Bypass any cache and refresh it with the response.
    Reload,
    /// Use a cached response only after revalidating it.
    NoCache,
    /// Prefer a cached response, even a stale one.
    ForceCache,
    /// Only answer from cache.
    OnlyIfCached,
}

impl RequestCache {
    /// Returns the `Cache-Control` request directive for this mode, if any.
    #[must_use]
    pub const fn as_cache_control(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::NoStore => Some("no-store"),
            Self::Reload | Self::NoCache => Some("no-cache"),
            Self::ForceCache => Some("max-stale"),
            Self::OnlyIfCached => Some("only-if-cached"),
        }
    }
}

/// Per-call options for [`GraphqlClient::execute`](crate::GraphqlClient::execute).
///
/// # Defaults
///
/// - `headers`: empty
/// - `cache`: `None`
/// - `revalidate`: `None`
/// - `with_auth`: `true`
///
/// # Example
///
/// ```rust
/// use storefront_client::clients::{RequestCache, RequestOptions};
///
/// let options = RequestOptions::builder()
///     .header("Accept-Language", "de")
///     .revalidate(60)
///     .with_auth(false)
///     .build();
///
/// assert!(!options.with_auth);
/// assert_eq!(options.revalidate, Some(60));
/// assert_eq!(options.cache, None::<RequestCache>);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    /// Additional headers, merged over the client defaults.
    pub headers: HashMap<String, String>,
    /// Caching directive passed to the transport.
    pub cache: Option<RequestCache>,
    /// Seconds after which a cached response is stale.
    pub revalidate: Option<u64>,
    /// Selects the authenticated (`true`) or anonymous retrying transport.
    pub with_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            cache: None,
            revalidate: None,
            with_auth: true,
        }
    }
}

impl RequestOptions {
    /// Creates a new builder with default options.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Options for an anonymous request, sent with retries.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            with_auth: false,
            ..Self::default()
        }
    }
}

/// Builder for [`RequestOptions`].
#[derive(Debug, Default)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    /// Adds a single header. A later value for the same name wins.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name.into(), value.into());
        self
    }

    /// Adds all headers from `headers`.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.options.headers.extend(headers);
        self
    }

    /// Sets the caching directive.
    #[must_use]
    pub const fn cache(mut self, cache: RequestCache) -> Self {
        self.options.cache = Some(cache);
        self
    }

    /// Sets the freshness window in seconds.
    #[must_use]
    pub const fn revalidate(mut self, seconds: u64) -> Self {
        self.options.revalidate = Some(seconds);
        self
    }

    /// Selects the authenticated or anonymous transport.
    #[must_use]
    pub const fn with_auth(mut self, with_auth: bool) -> Self {
        self.options.with_auth = with_auth;
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> RequestOptions {
        self.options
    }
}

/// The JSON body of a GraphQL-over-HTTP request.
///
/// `variables` is omitted from the wire format when absent.
#[derive(Debug, Serialize)]
pub struct GraphqlRequestBody<'a> {
    /// The GraphQL document.
    pub query: &'a str,
    /// Operation variables, if the operation takes any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl<'a> GraphqlRequestBody<'a> {
    /// Creates a body, dropping variables that serialize to `null` or `{}`.
    #[must_use]
    pub fn new(query: &'a str, variables: serde_json::Value) -> Self {
        let variables = match variables {
            serde_json::Value::Null => None,
            serde_json::Value::Object(ref map) if map.is_empty() => None,
            other => Some(other),
        };
        Self { query, variables }
    }
}

/// A prepared POST request, ready to be sent by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// Request headers, already merged.
    pub headers: HashMap<String, String>,
    /// Serialized JSON body.
    pub body: String,
    /// Caching directive.
    pub cache: Option<RequestCache>,
    /// Freshness window in seconds.
    pub revalidate: Option<u64>,
}

impl TransportRequest {
    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Sets a header, replacing any existing value under a name that differs
    /// only in case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Returns the `Cache-Control` value implied by `cache` and `revalidate`.
    ///
    /// An explicit cache mode takes precedence over the freshness window.
    #[must_use]
    pub fn cache_control(&self) -> Option<String> {
        self.cache
            .and_then(|cache| cache.as_cache_control())
            .map(String::from)
            .or_else(|| self.revalidate.map(|seconds| format!("max-age={seconds}")))
    }
}

/// Merges `extra` over `base`; keys colliding case-insensitively are replaced.
pub(crate) fn merge_headers(
    base: &HashMap<String, String>,
    extra: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = base
        .iter()
        .filter(|(key, _)| !extra.keys().any(|k| k.eq_ignore_ascii_case(key)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> TransportRequest {
        TransportRequest {
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: "{}".to_string(),
            cache: None,
            revalidate: None,
        }
    }

    #[test]
    fn test_request_options_default_uses_auth() {
        let options = RequestOptions::default();
        assert!(options.with_auth);
        assert!(options.headers.is_empty());
        assert!(options.cache.is_none());
        assert!(options.revalidate.is_none());
    }

    #[test]
    fn test_anonymous_options_disable_auth() {
        assert!(!RequestOptions::anonymous().with_auth);
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let options = RequestOptions::builder()
            .header("X-One", "1")
            .headers(HashMap::from([("X-Two".to_string(), "2".to_string())]))
            .cache(RequestCache::NoStore)
            .revalidate(30)
            .with_auth(false)
            .build();

        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.cache, Some(RequestCache::NoStore));
        assert_eq!(options.revalidate, Some(30));
        assert!(!options.with_auth);
    }

    #[test]
    fn test_body_omits_empty_variables() {
        let body = GraphqlRequestBody::new("{ shop { name } }", serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "query": "{ shop { name } }" })
        );

        let body = GraphqlRequestBody::new("{ shop { name } }", json!({}));
        assert!(body.variables.is_none());
    }

    #[test]
    fn test_body_keeps_variables() {
        let body = GraphqlRequestBody::new("query", json!({ "first": 12 }));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "query": "query", "variables": { "first": 12 } })
        );
    }

    #[test]
    fn test_merge_headers_caller_overrides_case_insensitively() {
        let base = HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]);
        let extra = HashMap::from([(
            "content-type".to_string(),
            "application/graphql+json".to_string(),
        )]);

        let merged = merge_headers(&base, &extra);

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get("content-type"),
            Some(&"application/graphql+json".to_string())
        );
        assert!(merged.get("Content-Type").is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = request();
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("application/json"));
        assert!(request.header("authorization").is_none());
    }

    #[test]
    fn test_set_header_replaces_existing() {
        let mut request = request();
        request.set_header("content-type", "text/plain");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_cache_control_prefers_cache_mode() {
        let mut request = request();
        assert!(request.cache_control().is_none());

        request.revalidate = Some(60);
        assert_eq!(request.cache_control().as_deref(), Some("max-age=60"));

        request.cache = Some(RequestCache::NoStore);
        assert_eq!(request.cache_control().as_deref(), Some("no-store"));

        request.cache = Some(RequestCache::Default);
        assert_eq!(request.cache_control().as_deref(), Some("max-age=60"));
    }
}
