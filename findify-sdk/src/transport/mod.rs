//! Transport selection and the wire-level transport abstraction.
//!
//! [`plan`] decides, synchronously, how a resolved request goes on the wire.
//! [`dispatch`] turns that plan into a pending call against a [`Transport`].
//! Nothing here retries, caches or rate-limits: each call is one attempt.

mod http;
pub mod jsonp;
pub mod mock;

pub use http::{HttpTransport, JSONP_TIMEOUT};

use crate::config::{ExecutionContext, TransportMode, TransportSettings};
use crate::error::{ClientError, ClientResult, TransportResult};
use crate::query;
use crate::url::append_query;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Query strings longer than this many bytes are always sent as POST.
pub const MAX_QUERY_BYTES: usize = 4096;

/// A transport that can issue the two kinds of call the service accepts.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` as JSON to `url`, authenticating with `key`.
    async fn post_json(&self, url: &str, key: &str, body: &Value) -> TransportResult<Value>;

    /// Issues a JSONP GET to `url`, which already carries the encoded query
    /// (including the key). The transport names the callback itself, using
    /// `callback_prefix`.
    async fn get_jsonp(&self, url: &str, callback_prefix: &str) -> TransportResult<Value>;
}

/// Wire method chosen for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireMethod {
    Post,
    Jsonp,
}

/// Outcome of transport selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub method: WireMethod,
    /// Target URL. For JSONP this already includes the query string.
    pub url: String,
    /// Encoded query string of the body plus `key`, as measured.
    pub query: String,
}

/// Chooses the wire method for a request body.
///
/// JSONP is refused outright outside an interactive context. Otherwise POST
/// is used when the settings ask for it or when the encoded query string
/// would exceed [`MAX_QUERY_BYTES`].
pub fn plan(
    url: &str,
    body: &Value,
    settings: &TransportSettings,
    context: ExecutionContext,
) -> ClientResult<DispatchPlan> {
    if settings.mode == TransportMode::Jsonp && !context.supports_jsonp() {
        return Err(ClientError::Environment(
            "jsonp not allowed outside browser-like context".to_string(),
        ));
    }

    let mut with_key = body.clone();
    if let Value::Object(map) = &mut with_key {
        map.insert("key".to_string(), Value::String(settings.key.clone()));
    }
    let query = query::stringify(&with_key);
    let bytes = query::byte_len(&query);

    let method = if settings.mode == TransportMode::Post || bytes > MAX_QUERY_BYTES {
        WireMethod::Post
    } else {
        WireMethod::Jsonp
    };

    debug!("Selected {:?} for {} ({} query bytes)", method, url, bytes);

    let url = match method {
        WireMethod::Post => url.to_string(),
        WireMethod::Jsonp => append_query(url, &query),
    };

    Ok(DispatchPlan { method, url, query })
}

/// Plans a call and hands it to the transport.
///
/// Selection errors are returned immediately. The returned future performs
/// the single network attempt when polled.
pub fn dispatch(
    transport: Arc<dyn Transport>,
    url: &str,
    body: Value,
    settings: TransportSettings,
    context: ExecutionContext,
) -> ClientResult<BoxFuture<'static, TransportResult<Value>>> {
    let plan = plan(url, &body, &settings, context)?;

    Ok(Box::pin(async move {
        match plan.method {
            WireMethod::Post => transport.post_json(&plan.url, &settings.key, &body).await,
            WireMethod::Jsonp => {
                transport
                    .get_jsonp(&plan.url, &settings.callback_prefix)
                    .await
            }
        }
    }))
}
