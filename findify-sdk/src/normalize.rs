//! Request normalization.
//!
//! Merges a caller's request with the session defaults held by the client
//! configuration and stamps the client-side timestamp. The merge is explicit
//! and ordered: the session user and log flag come first, the request's own
//! fields override them, and `t_client` is always added last.

use crate::config::ClientConfig;
use crate::error::IdentityError;
use findify_types::{
    AutocompleteRequest, CollectionRequest, FeedbackRequest, RecommendationsRequest, SearchRequest,
    User,
};
use serde::Serialize;

/// A request that can carry its own identity and logging flag.
pub trait ApiRequest: Serialize {
    /// Removes and returns the per-call identity, if any.
    fn take_user(&mut self) -> Option<User>;

    /// Removes and returns the per-call logging flag, if any.
    fn take_log(&mut self) -> Option<bool>;
}

macro_rules! impl_api_request {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiRequest for $ty {
                fn take_user(&mut self) -> Option<User> {
                    self.user.take()
                }

                fn take_log(&mut self) -> Option<bool> {
                    self.log.take()
                }
            }
        )*
    };
}

impl_api_request!(
    AutocompleteRequest,
    SearchRequest,
    CollectionRequest,
    RecommendationsRequest,
    FeedbackRequest,
);

/// An operation request merged with session defaults.
///
/// Serializes flat: the envelope fields sit next to the request's own
/// fields. The request's `user` and `log` have been moved into the
/// envelope, so neither is emitted twice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRequest<R> {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    /// Client wall-clock time in epoch milliseconds.
    pub t_client: i64,
    #[serde(flatten)]
    pub request: R,
}

/// Resolves a request against the client configuration using the current
/// wall-clock time.
pub fn resolve<R: ApiRequest>(
    request: R,
    config: &ClientConfig,
) -> Result<ResolvedRequest<R>, IdentityError> {
    resolve_at(request, config, chrono::Utc::now().timestamp_millis())
}

/// Resolves a request with an explicit client timestamp.
///
/// Identity checks run in order and the first failure wins: a missing user,
/// then a missing `uid`, then a missing `sid`.
pub fn resolve_at<R: ApiRequest>(
    mut request: R,
    config: &ClientConfig,
    t_client: i64,
) -> Result<ResolvedRequest<R>, IdentityError> {
    let log = request.take_log().or(config.log);
    let user = request
        .take_user()
        .or_else(|| config.user.clone())
        .ok_or(IdentityError::MissingUser)?;

    if user.uid.is_none() {
        return Err(IdentityError::MissingUid);
    }
    if user.sid.is_none() {
        return Err(IdentityError::MissingSid);
    }

    Ok(ResolvedRequest {
        user,
        log,
        t_client,
        request,
    })
}
