//! # Saleor Storefront Client
//!
//! The data-fetching layer of a Saleor storefront: a GraphQL client that
//! attaches authentication, retries transient failures of anonymous requests,
//! and returns typed results or typed errors.
//!
//! ## Overview
//!
//! This crate provides:
//! - Validated configuration via [`StorefrontConfig`], from a builder or the environment
//! - Typed operations via the [`Operation`](operation::Operation) trait
//! - [`GraphqlClient`] with authenticated and anonymous (retrying) request paths
//! - Pluggable [`Transport`](clients::Transport) and [`AuthProvider`](auth::AuthProvider) seams
//! - The storefront's [`ProductList`](catalog::ProductList) query
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_client::{ApiUrl, GraphqlClient, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .api_url(ApiUrl::new("https://demo.saleor.io/graphql/").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = GraphqlClient::new(&config, None);
//! assert_eq!(client.api_url().host_name(), "demo.saleor.io");
//! ```
//!
//! ## Executing Operations
//!
//! ```rust,ignore
//! use storefront_client::{GraphqlClient, RequestOptions};
//! use storefront_client::catalog::{ProductList, ProductListVariables};
//!
//! let client = GraphqlClient::from_env(None)?;
//! let variables = ProductListVariables { first: 12, channel: "default-channel".to_string() };
//!
//! // Anonymous request, retried with exponential backoff
//! let data = client
//!     .execute(&ProductList, &variables, RequestOptions::anonymous())
//!     .await?;
//! ```
//!
//! ## Authenticated Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_client::auth::{AccessToken, BearerTokenProvider};
//! use storefront_client::clients::ReqwestTransport;
//!
//! let provider = BearerTokenProvider::new(AccessToken::new(token), Arc::new(ReqwestTransport::new()));
//! let client = GraphqlClient::from_env(Some(Arc::new(provider)))?;
//!
//! // with_auth defaults to true
//! let products = storefront_client::catalog::fetch_product_list(&client, "default-channel").await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is read once and passed explicitly
//! - **Fail-fast validation**: A client cannot exist without a valid endpoint
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod operation;

// Re-export public types at crate root for convenience
pub use config::{ApiUrl, StorefrontConfig, StorefrontConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::graphql::{GraphqlErrorMessage, GraphqlResponseError};
pub use clients::{
    GraphqlClient, GraphqlError, HttpError, HttpStatusError, RequestCache, RequestOptions,
    RetryPolicy, Transport, TransportRequest, TransportResponse,
};

pub use auth::{AuthError, AuthProvider, AuthenticatedTransport};
pub use operation::{NoVariables, Operation, TypedDocument};
