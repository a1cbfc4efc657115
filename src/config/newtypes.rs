//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated GraphQL endpoint URL.
///
/// The URL must be absolute and use the `http` or `https` scheme. Surrounding
/// whitespace is trimmed; everything else (path, trailing slash, query) is
/// kept verbatim, since Saleor endpoints conventionally end in `/graphql/`.
///
/// # Serialization
///
/// `ApiUrl` serializes to and deserializes from the plain URL string:
///
/// ```rust
/// use storefront_client::ApiUrl;
///
/// let url = ApiUrl::new("https://demo.saleor.io/graphql/").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://demo.saleor.io/graphql/""#);
/// ```
///
/// # Example
///
/// ```rust
/// use storefront_client::ApiUrl;
///
/// let url = ApiUrl::new("https://demo.saleor.io/graphql/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "demo.saleor.io");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiUrl`] if the URL is blank, or
    /// [`ConfigError::InvalidApiUrl`] if it has no `http`/`https` scheme or
    /// no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        let invalid = || ConfigError::InvalidApiUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`, as written).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the full URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
