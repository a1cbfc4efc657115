//! Tests for the client's tracing output.
//!
//! Events are captured with a recording layer installed as the thread's
//! default subscriber; `#[tokio::test]` runs everything on that thread.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use storefront_client::auth::{AccessToken, BearerTokenProvider};
use storefront_client::clients::ReqwestTransport;
use storefront_client::{
    ApiUrl, AuthProvider, GraphqlClient, RequestOptions, RetryPolicy, StorefrontConfig,
};
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOP_QUERY: &str = "query { shop { name } }";

#[derive(Clone, Debug)]
struct CapturedEvent {
    level: Level,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct RecordingLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl RecordingLayer {
    /// Captured events emitted by this crate at `level`.
    fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::always()
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        true
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("storefront_client") {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            fields,
        });
    }
}

fn client_for(server: &MockServer, auth: Option<Arc<dyn AuthProvider>>) -> GraphqlClient {
    let config = StorefrontConfig::builder()
        .api_url(ApiUrl::new(format!("{}/graphql/", server.uri())).unwrap())
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(1)))
        .build()
        .unwrap();
    GraphqlClient::new(&config, auth)
}

fn bearer(token: &str) -> Arc<dyn AuthProvider> {
    Arc::new(BearerTokenProvider::new(
        AccessToken::new(token),
        Arc::new(ReqwestTransport::new()),
    ))
}

fn assert_single_failure_event_with_body(recorder: &RecordingLayer) {
    let errors = recorder.events_at(Level::ERROR);
    assert_eq!(errors.len(), 1, "expected one error event, got {errors:?}");

    let body: serde_json::Value =
        serde_json::from_str(&errors[0].fields["request_body"]).unwrap();
    assert_eq!(body, json!({ "query": SHOP_QUERY }));
}

#[tokio::test]
async fn test_anonymous_http_failure_logs_request_body_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let recorder = RecordingLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let client = client_for(&mock_server, None);
    let result = client
        .execute_raw(SHOP_QUERY, json!({}), RequestOptions::anonymous())
        .await;

    assert!(result.is_err());
    assert_single_failure_event_with_body(&recorder);
    // One warning per retry
    assert_eq!(recorder.events_at(Level::WARN).len(), 2);
}

#[tokio::test]
async fn test_authenticated_http_failure_logs_request_body_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let recorder = RecordingLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let client = client_for(&mock_server, Some(bearer("secret-token")));
    let result = client
        .execute_raw(SHOP_QUERY, json!({}), RequestOptions::default())
        .await;

    assert!(result.is_err());
    assert_single_failure_event_with_body(&recorder);
    assert!(recorder.events_at(Level::WARN).is_empty());
}

#[tokio::test]
async fn test_success_logs_no_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": true } })))
        .mount(&mock_server)
        .await;

    let recorder = RecordingLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let client = client_for(&mock_server, None);
    client
        .execute_raw(SHOP_QUERY, json!({}), RequestOptions::anonymous())
        .await
        .unwrap();

    assert!(recorder.events_at(Level::ERROR).is_empty());
    assert!(recorder.events_at(Level::WARN).is_empty());
}

#[tokio::test]
async fn test_graphql_errors_are_not_logged_as_http_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "errors": [{ "message": "nope" }] })),
        )
        .mount(&mock_server)
        .await;

    let recorder = RecordingLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(recorder.clone()));

    let client = client_for(&mock_server, None);
    let result = client
        .execute_raw(SHOP_QUERY, json!({}), RequestOptions::anonymous())
        .await;

    assert!(result.is_err());
    assert!(recorder.events_at(Level::ERROR).is_empty());
}
