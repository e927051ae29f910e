//! Shared test helpers for client tests.

#![allow(dead_code)]

use findify_sdk::transport::mock::RecordingTransport;
use findify_sdk::{ClientConfig, ExecutionContext, FindifyClient, TransportMode};
use findify_types::User;

pub const TEST_KEY: &str = "testApiKey";

/// A config with a complete session identity.
pub fn test_config() -> ClientConfig {
    ClientConfig::new(TEST_KEY).with_user(User::new("testUserId", "testSessionId"))
}

/// A POST-mode client over a recording transport.
pub fn post_client() -> (FindifyClient, RecordingTransport) {
    client_with(
        test_config().with_transport_mode(TransportMode::Post),
        ExecutionContext::Restricted,
    )
}

pub fn client_with(
    config: ClientConfig,
    context: ExecutionContext,
) -> (FindifyClient, RecordingTransport) {
    let transport = RecordingTransport::new();
    let client = FindifyClient::builder(config)
        .context(context)
        .transport(transport.clone())
        .build()
        .unwrap();
    (client, transport)
}

/// Returns `url` without scheme and host.
pub fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .find('/')
        .map_or("/", |idx| &without_scheme[idx..])
}
