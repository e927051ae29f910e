//! A recording transport for testing.

use super::{Transport, WireMethod};
use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One call seen by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: WireMethod,
    pub url: String,
    /// `x-key` header value for POST calls.
    pub key: Option<String>,
    /// JSON body for POST calls.
    pub body: Option<Value>,
    /// Callback prefix for JSONP calls.
    pub callback_prefix: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<RecordedCall>,
    responses: VecDeque<TransportResult<Value>>,
}

/// Records every call and answers from a queue of canned responses.
///
/// When the queue is empty each call answers with an empty JSON object.
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<State>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn respond_with(&self, body: Value) -> &Self {
        self.lock().responses.push_back(Ok(body));
        self
    }

    /// Queues a failure.
    pub fn fail_with(&self, err: TransportError) -> &Self {
        self.lock().responses.push_back(Err(err));
        self
    }

    /// Returns all calls seen so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().calls.last().cloned()
    }

    fn record(&self, call: RecordedCall) -> TransportResult<Value> {
        let mut state = self.lock();
        state.calls.push(call);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post_json(&self, url: &str, key: &str, body: &Value) -> TransportResult<Value> {
        self.record(RecordedCall {
            method: WireMethod::Post,
            url: url.to_string(),
            key: Some(key.to_string()),
            body: Some(body.clone()),
            callback_prefix: None,
        })
    }

    async fn get_jsonp(&self, url: &str, callback_prefix: &str) -> TransportResult<Value> {
        self.record(RecordedCall {
            method: WireMethod::Jsonp,
            url: url.to_string(),
            key: None,
            body: None,
            callback_prefix: Some(callback_prefix.to_string()),
        })
    }
}
