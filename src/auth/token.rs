//! Access token type for authenticated requests.
//!
//! # Security
//!
//! [`AccessToken`] implements a custom [`Debug`] that masks the token value,
//! preventing accidental exposure in logs.
//!
//! ```rust
//! use storefront_client::auth::AccessToken;
//!
//! let token = AccessToken::new("secret-token");
//! assert_eq!(format!("{:?}", token), "AccessToken(*****)");
//! ```

use std::fmt;

/// HTTP header carrying the access token.
pub const AUTHORIZATION_HEADER_NAME: &str = "Authorization";

/// A bearer access token issued by the commerce backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the HTTP header name for this token.
    #[must_use]
    pub const fn header_name(&self) -> &'static str {
        AUTHORIZATION_HEADER_NAME
    }

    /// Returns the header value, `Bearer <token>`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_client::auth::AccessToken;
    ///
    /// let token = AccessToken::new("abc");
    /// assert_eq!(token.header_value(), "Bearer abc");
    /// ```
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_name_is_authorization() {
        let token = AccessToken::new("t");
        assert_eq!(token.header_name(), "Authorization");
    }

    #[test]
    fn test_header_value_uses_bearer_scheme() {
        let token = AccessToken::new("my-token");
        assert_eq!(token.header_value(), "Bearer my-token");
        assert_eq!(token.as_str(), "my-token");
    }

    #[test]
    fn test_debug_masks_token_value() {
        let token = AccessToken::new("super-secret-token");
        let debug_output = format!("{token:?}");

        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }
}
