//! Bearer token authentication over a plain transport.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::{AccessToken, AuthError, AuthProvider, AuthenticatedTransport};
use crate::clients::{HttpError, Transport, TransportRequest, TransportResponse};

/// [`AuthProvider`] that attaches a fixed [`AccessToken`].
///
/// Requests are sent once over the wrapped transport. Token refresh is out of
/// scope here; providers backed by a session store implement [`AuthProvider`]
/// themselves.
#[derive(Clone, Debug)]
pub struct BearerTokenProvider {
    token: AccessToken,
    transport: Arc<dyn Transport>,
}

impl BearerTokenProvider {
    /// Creates a provider sending through `transport`.
    #[must_use]
    pub fn new(token: AccessToken, transport: Arc<dyn Transport>) -> Self {
        Self { token, transport }
    }
}

#[async_trait]
impl AuthProvider for BearerTokenProvider {
    async fn authenticated_transport(
        &self,
    ) -> Result<Arc<dyn AuthenticatedTransport>, AuthError> {
        if self.token.as_str().is_empty() {
            return Err(AuthError::Unavailable {
                reason: "access token is empty".to_string(),
            });
        }
        Ok(Arc::new(BearerTransport {
            token: self.token.clone(),
            inner: Arc::clone(&self.transport),
        }))
    }
}

/// [`AuthenticatedTransport`] adding an `Authorization: Bearer` header.
#[derive(Debug)]
pub struct BearerTransport {
    token: AccessToken,
    inner: Arc<dyn Transport>,
}

#[async_trait]
impl AuthenticatedTransport for BearerTransport {
    async fn fetch_with_auth(
        &self,
        url: &str,
        request: &TransportRequest,
    ) -> Result<TransportResponse, HttpError> {
        let mut request = request.clone();
        request.set_header(self.token.header_name(), self.token.header_value());
        self.inner.fetch(url, &request).await
    }
}
