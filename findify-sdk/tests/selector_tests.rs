use findify_sdk::transport::plan;
use findify_sdk::{
    ClientConfig, ClientError, ExecutionContext, MAX_QUERY_BYTES, TransportMode, TransportSettings,
    WireMethod,
};
use serde_json::{Value, json};

const URL: &str = "https://api-v3.findify.io/v3/search";

fn settings(mode: Option<TransportMode>, context: ExecutionContext) -> TransportSettings {
    let mut config = ClientConfig::new("testApiKey");
    config.transport_mode = mode;
    TransportSettings::from_config(&config, context)
}

fn small_body() -> Value {
    json!({ "q": "shoes", "user": { "uid": "u1", "sid": "s1" } })
}

fn body_of_size(len: usize) -> Value {
    json!({ "q": "a".repeat(len) })
}

// ── Context checks ──────────────────────────────────────────────

#[test]
fn jsonp_refused_in_restricted_context() {
    let settings = settings(Some(TransportMode::Jsonp), ExecutionContext::Restricted);
    let err = plan(URL, &small_body(), &settings, ExecutionContext::Restricted).unwrap_err();
    assert!(matches!(err, ClientError::Environment(_)));
    assert_eq!(
        err.to_string(),
        "jsonp not allowed outside browser-like context"
    );
}

#[test]
fn unset_mode_follows_context() {
    let restricted = settings(None, ExecutionContext::Restricted);
    assert_eq!(restricted.mode, TransportMode::Post);
    let chosen = plan(URL, &small_body(), &restricted, ExecutionContext::Restricted).unwrap();
    assert_eq!(chosen.method, WireMethod::Post);

    let interactive = settings(None, ExecutionContext::Interactive);
    assert_eq!(interactive.mode, TransportMode::Jsonp);
    let chosen = plan(URL, &small_body(), &interactive, ExecutionContext::Interactive).unwrap();
    assert_eq!(chosen.method, WireMethod::Jsonp);
}

// ── Method choice ───────────────────────────────────────────────

#[test]
fn post_mode_always_posts() {
    for context in [ExecutionContext::Restricted, ExecutionContext::Interactive] {
        let settings = settings(Some(TransportMode::Post), context);
        let chosen = plan(URL, &small_body(), &settings, context).unwrap();
        assert_eq!(chosen.method, WireMethod::Post);
        assert_eq!(chosen.url, URL);
    }
}

#[test]
fn oversized_query_forces_post() {
    let settings = settings(Some(TransportMode::Jsonp), ExecutionContext::Interactive);
    let chosen = plan(
        URL,
        &body_of_size(MAX_QUERY_BYTES),
        &settings,
        ExecutionContext::Interactive,
    )
    .unwrap();
    assert_eq!(chosen.method, WireMethod::Post);
    assert!(chosen.query.len() > MAX_QUERY_BYTES);
    assert_eq!(chosen.url, URL);
}

#[test]
fn query_at_limit_stays_jsonp() {
    let settings = settings(Some(TransportMode::Jsonp), ExecutionContext::Interactive);
    // "q=" + value + "&key=testApiKey" must total exactly MAX_QUERY_BYTES.
    let overhead = "q=".len() + "&key=testApiKey".len();
    let body = body_of_size(MAX_QUERY_BYTES - overhead);

    let chosen = plan(URL, &body, &settings, ExecutionContext::Interactive).unwrap();
    assert_eq!(chosen.query.len(), MAX_QUERY_BYTES);
    assert_eq!(chosen.method, WireMethod::Jsonp);

    let body = body_of_size(MAX_QUERY_BYTES - overhead + 1);
    let chosen = plan(URL, &body, &settings, ExecutionContext::Interactive).unwrap();
    assert_eq!(chosen.method, WireMethod::Post);
}

#[test]
fn multibyte_characters_count_as_bytes() {
    let settings = settings(Some(TransportMode::Jsonp), ExecutionContext::Interactive);
    // Each "é" encodes to "%C3%A9", six bytes.
    let body = json!({ "q": "é".repeat(MAX_QUERY_BYTES / 6) });
    let chosen = plan(URL, &body, &settings, ExecutionContext::Interactive).unwrap();
    assert_eq!(chosen.method, WireMethod::Post);
}

// ── Query contents ──────────────────────────────────────────────

#[test]
fn query_carries_key_and_body() {
    let settings = settings(Some(TransportMode::Jsonp), ExecutionContext::Interactive);
    let chosen = plan(URL, &small_body(), &settings, ExecutionContext::Interactive).unwrap();

    assert!(chosen.query.contains("key=testApiKey"));
    assert!(chosen.query.contains("q=shoes"));
    assert!(chosen.query.contains("user%5Buid%5D=u1"));
    assert_eq!(chosen.url, format!("{URL}?{}", chosen.query));
}

#[test]
fn post_plan_leaves_body_untouched() {
    let settings = settings(Some(TransportMode::Post), ExecutionContext::Restricted);
    let body = small_body();
    let chosen = plan(URL, &body, &settings, ExecutionContext::Restricted).unwrap();
    assert!(chosen.query.contains("key=testApiKey"));
    assert!(body.get("key").is_none());
}
