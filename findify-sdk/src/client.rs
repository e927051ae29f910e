//! The public client.
//!
//! Every operation follows the same shape: validate, resolve the identity,
//! pick the endpoint path, then hand the body to the transport selector.
//! All of that happens before the method returns, so a bad request fails
//! without touching the network. The returned [`ApiCall`] performs the
//! single network attempt when awaited.

use crate::config::{ClientConfig, ExecutionContext, TransportSettings};
use crate::error::{ClientError, ClientResult, TransportError, TransportResult};
use crate::normalize::{self, ApiRequest};
use crate::transport::{self, HttpTransport, Transport};
use crate::url::{path_segment, resolve_url};
use crate::validation;
use findify_types::{
    AutocompleteRequest, AutocompleteResponse, CollectionRequest, CollectionResponse,
    FeedbackRequest, RecommendationType, RecommendationsRequest, RecommendationsResponse,
    SearchRequest, SearchResponse,
};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A call that has passed validation and is ready to go on the wire.
///
/// Resolves exactly once, to the decoded response body or a
/// [`TransportError`]. Dropping it before completion abandons the call.
#[must_use = "an ApiCall does nothing until awaited"]
pub struct ApiCall<T> {
    inner: BoxFuture<'static, TransportResult<Value>>,
    _response: PhantomData<fn() -> T>,
}

impl<T> ApiCall<T> {
    fn new(inner: BoxFuture<'static, TransportResult<Value>>) -> Self {
        Self {
            inner,
            _response: PhantomData,
        }
    }

    /// Returns the call as a future of the undecoded response body.
    pub fn into_raw(self) -> BoxFuture<'static, TransportResult<Value>> {
        self.inner
    }
}

impl<T: DeserializeOwned> Future for ApiCall<T> {
    type Output = TransportResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        this.inner
            .as_mut()
            .poll(cx)
            .map(|result| result.and_then(|body| Ok(serde_json::from_value(body)?)))
    }
}

impl<T> std::fmt::Debug for ApiCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCall").finish_non_exhaustive()
    }
}

/// Builder for a [`FindifyClient`] with a custom transport or context.
pub struct ClientBuilder {
    config: ClientConfig,
    context: ExecutionContext,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Sets the execution context. Defaults to [`ExecutionContext::Restricted`].
    #[must_use]
    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Replaces the HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Validates the configuration and builds the client.
    pub fn build(self) -> ClientResult<FindifyClient> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new().map_err(|e| {
                ClientError::Config(format!("failed to create HTTP client: {e}"))
            })?),
        };

        Ok(FindifyClient {
            config: Arc::new(self.config),
            context: self.context,
            transport,
        })
    }
}

/// Client for the Findify API.
///
/// Holds only immutable configuration, so it can be cloned and shared across
/// tasks freely.
#[derive(Clone)]
pub struct FindifyClient {
    config: Arc<ClientConfig>,
    context: ExecutionContext,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FindifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindifyClient")
            .field("config", &self.config)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl FindifyClient {
    /// Creates a client using HTTP in a restricted context.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            context: ExecutionContext::default(),
            transport: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Search-as-you-type suggestions and items for a partial query.
    pub fn autocomplete(
        &self,
        request: AutocompleteRequest,
    ) -> ClientResult<ApiCall<AutocompleteResponse>> {
        validation::validate_autocomplete(&request)?;
        self.send_resolved("/autocomplete", request)
    }

    pub fn search(&self, request: SearchRequest) -> ClientResult<ApiCall<SearchResponse>> {
        validation::validate_search(&request)?;
        self.send_resolved("/search", request)
    }

    /// Browses the collection named by `request.slot`.
    pub fn collection(
        &self,
        request: CollectionRequest,
    ) -> ClientResult<ApiCall<CollectionResponse>> {
        validation::validate_collection(&request)?;
        let slot = request.slot.as_deref().unwrap_or_default();
        let path = format!("/collection/{}", path_segment(slot));
        self.send_resolved(&path, request)
    }

    /// Fetches recommendations of the given type.
    ///
    /// `slot` never appears in the body. `item_id` is moved into the path
    /// for `Viewed` and `Bought` and passed through for the other types.
    /// `Featured` takes no parameters and sends only the identity envelope.
    pub fn recommendations(
        &self,
        kind: RecommendationType,
        request: Option<RecommendationsRequest>,
    ) -> ClientResult<ApiCall<RecommendationsResponse>> {
        let mut request = request.unwrap_or_default();
        validation::validate_recommendations(kind, &request)?;

        let path = match kind {
            RecommendationType::Predefined => {
                format!("/recommend/{}", path_segment(request.slot.as_deref().unwrap_or_default()))
            }
            RecommendationType::Viewed | RecommendationType::Bought => {
                let item = request
                    .item_id
                    .take()
                    .map(|id| path_segment(&id.to_string()))
                    .unwrap_or_default();
                format!("/recommend/items/{item}/viewed/{kind}")
            }
            RecommendationType::Featured
            | RecommendationType::Newest
            | RecommendationType::Trending
            | RecommendationType::Latest => format!("/recommend/items/{kind}"),
        };

        let body = match kind {
            RecommendationType::Featured => RecommendationsRequest {
                user: request.user,
                log: request.log,
                ..Default::default()
            },
            _ => request,
        };
        self.send_resolved(&path, body)
    }

    /// Sends an analytics event.
    ///
    /// The event fields are sent as supplied, inside the same identity
    /// envelope as every other operation.
    pub fn feedback(&self, request: FeedbackRequest) -> ClientResult<ApiCall<Value>> {
        validation::validate_feedback(&request)?;
        self.send_resolved("/feedback", request)
    }

    fn send_resolved<R: ApiRequest, T>(&self, path: &str, request: R) -> ClientResult<ApiCall<T>> {
        let resolved = normalize::resolve(request, &self.config)?;
        let body = serde_json::to_value(&resolved)?;
        self.send(path, body)
    }

    fn send<T>(&self, path: &str, body: Value) -> ClientResult<ApiCall<T>> {
        let settings = TransportSettings::from_config(&self.config, self.context);
        let url = resolve_url(&settings.host, path);
        let call = transport::dispatch(
            Arc::clone(&self.transport),
            &url,
            body,
            settings,
            self.context,
        )?;
        Ok(ApiCall::new(call))
    }
}
