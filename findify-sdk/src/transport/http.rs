//! HTTP transport backed by `reqwest`.

use super::Transport;
use super::jsonp::{self, CallbackRegistry};
use crate::error::{TransportError, TransportResult};
use crate::url::append_query;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a JSONP call may take before it is abandoned.
pub const JSONP_TIMEOUT: Duration = Duration::from_millis(1000);

/// Transport issuing real HTTP requests.
///
/// POST calls have no client-side timeout. JSONP calls are bounded by
/// [`JSONP_TIMEOUT`] unless overridden.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    jsonp_timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> TransportResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Creates a transport over an existing `reqwest` client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            jsonp_timeout: JSONP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_jsonp_timeout(mut self, timeout: Duration) -> Self {
        self.jsonp_timeout = timeout;
        self
    }

    async fn fetch_script(&self, url: &str) -> TransportResult<String> {
        let response = check_status(self.client.get(url).send().await?).await?;
        Ok(response.text().await?)
    }
}

async fn check_status(response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, key: &str, body: &Value) -> TransportResult<Value> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header("x-key", key)
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_jsonp(&self, url: &str, callback_prefix: &str) -> TransportResult<Value> {
        let slot = CallbackRegistry::global().acquire(callback_prefix);
        let url = append_query(url, &format!("callback={}", urlencoding::encode(slot.name())));

        debug!("JSONP GET {}", url);

        let script = tokio::time::timeout(self.jsonp_timeout, self.fetch_script(&url))
            .await
            .map_err(|_| {
                warn!("JSONP call {} timed out after {:?}", slot.name(), self.jsonp_timeout);
                TransportError::Timeout(self.jsonp_timeout)
            })??;

        jsonp::parse_body(&script, slot.name())
    }
}
