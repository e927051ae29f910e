//! Error types for the client.
//!
//! Failures are split by the channel they travel on. [`ClientError`] covers
//! everything detected before any I/O and is returned synchronously from the
//! client methods. [`TransportError`] is only ever produced by the pending
//! call once it has been awaited.

use std::time::Duration;
use thiserror::Error;

/// Result type for synchronous client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Result type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Result type for callers that do not need to tell the two channels apart.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before a request is put on the wire.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid client configuration.
    #[error("{0}")]
    Config(String),

    /// A required request field is missing.
    #[error("\"{field}\" param is required")]
    Validation { field: String },

    /// The request has no complete end-user identity.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Unrecognized feedback event name.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// The requested transport is not usable in this execution context.
    #[error("{0}")]
    Environment(String),

    /// The request could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Creates a validation error for a missing field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// True for missing-field and identity errors.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Identity(_))
    }

    /// The offending field path, if this is a validation error.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field } => Some(field),
            Self::Identity(err) => Some(err.field()),
            _ => None,
        }
    }
}

/// Identity merge failures, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("\"user\" param is required at request or config")]
    MissingUser,

    #[error("\"user.uid\" param is required")]
    MissingUid,

    #[error("\"user.sid\" param is required")]
    MissingSid,
}

impl IdentityError {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingUser => "user",
            Self::MissingUid => "user.uid",
            Self::MissingSid => "user.sid",
        }
    }
}

/// Errors delivered through a pending call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or protocol failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The JSONP call did not complete in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The JSONP script did not invoke the expected callback.
    #[error("malformed jsonp response: {0}")]
    Jsonp(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The transport went away before answering.
    #[error("transport closed")]
    Closed,
}

/// Any error the client can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        Self::Client(err.into())
    }
}
