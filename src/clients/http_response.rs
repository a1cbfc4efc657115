//! HTTP response type returned by transports.

use std::collections::HashMap;

use crate::clients::errors::HttpStatusError;

/// A raw HTTP response from the API.
///
/// Transports return the body unparsed; the GraphQL client decodes the
/// envelope only after the status has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The status text (reason phrase).
    pub status_text: String,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body: body.into(),
        }
    }

    /// Creates a response with the canonical reason phrase for `status` and no headers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_client::clients::TransportResponse;
    ///
    /// let response = TransportResponse::from_status(502, "");
    /// assert_eq!(response.status_text, "Bad Gateway");
    /// assert!(!response.is_ok());
    /// ```
    #[must_use]
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default();
        Self::new(status, status_text, HashMap::new(), body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the status error describing this response.
    #[must_use]
    pub fn status_error(&self) -> HttpStatusError {
        HttpStatusError {
            code: self.status,
            status_text: self.status_text.clone(),
        }
    }
}
