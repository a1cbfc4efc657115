//! Authentication seam for the storefront client.
//!
//! The GraphQL client does not implement authentication. For requests made
//! with `with_auth` (the default) it asks an injected [`AuthProvider`] for an
//! [`AuthenticatedTransport`] and sends the request through it exactly once.
//! The authenticated transport owns its retry and token refresh behavior.
//!
//! # Overview
//!
//! - [`AuthProvider`]: Supplies an authenticated transport per call
//! - [`AuthenticatedTransport`]: Sends a request with credentials attached
//! - [`AccessToken`]: A bearer token with masked debug output
//! - [`BearerTokenProvider`]: Provider attaching a static bearer token
//! - [`AuthError`]: Failures obtaining an authenticated transport
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_client::auth::{AccessToken, BearerTokenProvider};
//! use storefront_client::clients::ReqwestTransport;
//!
//! let provider = BearerTokenProvider::new(
//!     AccessToken::new("eyJ..."),
//!     Arc::new(ReqwestTransport::new()),
//! );
//! ```

mod bearer;
mod token;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::clients::{HttpError, TransportRequest, TransportResponse};

pub use bearer::{BearerTokenProvider, BearerTransport};
pub use token::AccessToken;

/// Errors raised while obtaining an authenticated transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An authenticated request was made on a client without an auth provider.
    #[error("Authenticated request requires an auth provider, but none is configured. Pass one to the client or set `with_auth` to false.")]
    ProviderNotConfigured,

    /// The provider could not supply credentials.
    #[error("Authentication unavailable: {reason}")]
    Unavailable {
        /// Why no authenticated transport could be produced.
        reason: String,
    },
}

/// Sends requests with credentials attached.
#[async_trait]
pub trait AuthenticatedTransport: Send + Sync + fmt::Debug {
    /// Sends `request` to `url` with credentials.
    ///
    /// As with [`Transport`](crate::clients::Transport), non-2xx responses are
    /// returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response could be obtained.
    async fn fetch_with_auth(
        &self,
        url: &str,
        request: &TransportRequest,
    ) -> Result<TransportResponse, HttpError>;
}

/// Supplies an [`AuthenticatedTransport`] for each authenticated call.
#[async_trait]
pub trait AuthProvider: Send + Sync + fmt::Debug {
    /// Returns the transport to use for the current call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unavailable`] if credentials cannot be obtained.
    async fn authenticated_transport(&self)
        -> Result<Arc<dyn AuthenticatedTransport>, AuthError>;
}
