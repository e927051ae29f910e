use findify_sdk::transport::jsonp::CallbackRegistry;
use findify_sdk::{
    ClientConfig, ExecutionContext, FindifyClient, HttpTransport, Transport, TransportError,
    TransportMode,
};
use findify_types::{SearchRequest, SearchResponse, User};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const KEY: &str = "testApiKey";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("findify_sdk=debug")
        .with_test_writer()
        .try_init();
}

fn config(server: &MockServer, mode: TransportMode) -> ClientConfig {
    ClientConfig::new(KEY)
        .with_user(User::new("u1", "s1"))
        .with_host(server.uri())
        .with_transport_mode(mode)
}

fn client(config: ClientConfig, context: ExecutionContext) -> FindifyClient {
    FindifyClient::builder(config)
        .context(context)
        .transport(HttpTransport::new().unwrap())
        .build()
        .unwrap()
}

/// Answers a JSONP GET by invoking the requested callback with `body`.
struct JsonpEcho {
    body: serde_json::Value,
}

impl Respond for JsonpEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let callback = request
            .url
            .query_pairs()
            .find(|(name, _)| name == "callback")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        ResponseTemplate::new(200)
            .insert_header("content-type", "application/javascript")
            .set_body_string(format!(
                "/**/ typeof {callback} === 'function' && {callback}({});",
                self.body
            ))
    }
}

// ── POST ────────────────────────────────────────────────────────

#[tokio::test]
async fn post_sends_key_header_and_json_body() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-key", KEY))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "q": "shoes",
            "user": { "uid": "u1", "sid": "s1" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "rid": "r-1", "total": 1 },
            "items": [{ "id": "p1" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(config(&server, TransportMode::Post), ExecutionContext::Restricted);
    let response: SearchResponse = client
        .search(SearchRequest::new("shoes"))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(response.meta.rid, "r-1");
    assert_eq!(response.items[0].id, "p1");
}

#[tokio::test]
async fn post_error_status_is_reported() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = client(config(&server, TransportMode::Post), ExecutionContext::Restricted);
    let err = client
        .search(SearchRequest::new("shoes"))
        .unwrap()
        .await
        .unwrap_err();

    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn post_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .post_json(&format!("{}/search", server.uri()), KEY, &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn connection_failure_is_network_error() {
    let transport = HttpTransport::new().unwrap();
    let err = transport
        .post_json("http://127.0.0.1:1/search", KEY, &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

// ── JSONP ───────────────────────────────────────────────────────

#[tokio::test]
async fn jsonp_get_carries_query_and_callback() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", KEY))
        .and(query_param("q", "shoes"))
        .and(query_param("user[uid]", "u1"))
        .respond_with(JsonpEcho {
            body: json!({ "meta": { "rid": "r-2" }, "items": [] }),
        })
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, TransportMode::Jsonp).with_callback_prefix("echoTest");
    let client = client(config, ExecutionContext::Interactive);
    let response: SearchResponse = client
        .search(SearchRequest::new("shoes"))
        .unwrap()
        .await
        .unwrap();
    assert_eq!(response.meta.rid, "r-2");

    let requests = server.received_requests().await.unwrap();
    let callback = requests[0]
        .url
        .query_pairs()
        .find(|(name, _)| name == "callback")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(callback.starts_with("echoTest"));
}

#[tokio::test]
async fn jsonp_slot_released_after_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(JsonpEcho { body: json!({}) })
        .mount(&server)
        .await;

    let prefix = "releaseTest";
    let transport = HttpTransport::new().unwrap();
    transport
        .get_jsonp(&format!("{}/search?key={KEY}", server.uri()), prefix)
        .await
        .unwrap();

    assert!(CallbackRegistry::global().active_with_prefix(prefix).is_empty());
}

#[tokio::test]
async fn jsonp_times_out() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(Delayed {
            inner: JsonpEcho { body: json!({}) },
            delay: Duration::from_millis(500),
        })
        .mount(&server)
        .await;

    let prefix = "timeoutTest";
    let transport = HttpTransport::new()
        .unwrap()
        .with_jsonp_timeout(Duration::from_millis(50));
    let err = transport
        .get_jsonp(&format!("{}/search", server.uri()), prefix)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Timeout(d) if d == Duration::from_millis(50)));
    assert!(CallbackRegistry::global().active_with_prefix(prefix).is_empty());
}

#[tokio::test]
async fn jsonp_without_callback_invocation_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("console.log('hi')"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .get_jsonp(&format!("{}/search", server.uri()), "missingTest")
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Jsonp(_)));
}

#[tokio::test]
async fn oversized_jsonp_request_goes_out_as_post() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(config(&server, TransportMode::Jsonp), ExecutionContext::Interactive);
    client
        .search(SearchRequest::new("x".repeat(5000)))
        .unwrap()
        .await
        .unwrap();
}

// ── Delayed responder ───────────────────────────────────────────

struct Delayed<R> {
    inner: R,
    delay: Duration,
}

impl<R: Respond> Respond for Delayed<R> {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.inner.respond(request).set_delay(self.delay)
    }
}
