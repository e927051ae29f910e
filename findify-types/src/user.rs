//! End-user identity.

use serde::{Deserialize, Serialize};

/// The end-user and session pair the service attributes requests to.
///
/// `uid` and `sid` are optional in the type so that a partially filled
/// identity can be reported precisely; a request with either one missing is
/// rejected before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Persistent visitor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    /// Preferred languages, most preferred first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Vec<String>>,
}

impl User {
    /// Creates a complete identity from a visitor and session id.
    #[must_use]
    pub fn new(uid: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            sid: Some(sid.into()),
            ..Default::default()
        }
    }

    /// Returns true when both `uid` and `sid` are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.uid.is_some() && self.sid.is_some()
    }
}
