//! Client configuration and per-call transport settings.

use crate::error::{ClientError, ClientResult};
use findify_types::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL of the Findify API.
pub const DEFAULT_HOST: &str = "https://api-v3.findify.io";

/// Prefix of generated JSONP callback names.
pub const DEFAULT_CALLBACK_PREFIX: &str = "findifyCallback";

/// Wire method used to reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// JSON body over HTTP POST, key in the `x-key` header.
    Post,
    /// Query-string GET answered with a callback script.
    Jsonp,
}

impl TransportMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Jsonp => "jsonp",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "jsonp" => Ok(Self::Jsonp),
            _ => Err(ClientError::Config(
                "\"method\" param should be either \"post\" or \"jsonp\"".to_string(),
            )),
        }
    }
}

/// Where the client is running.
///
/// JSONP relies on a page that can inject script tags, so it is only
/// available in an interactive context. Server processes are restricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    #[default]
    Restricted,
    Interactive,
}

impl ExecutionContext {
    #[must_use]
    pub const fn supports_jsonp(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Client configuration. Fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key identifying the merchant.
    pub key: String,
    /// Session identity used when a request carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Forced transport. When unset it follows the execution context.
    #[serde(default, alias = "method", skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    /// Whether the service should log requests for analytics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_callback_prefix")]
    pub callback_prefix: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_callback_prefix() -> String {
    DEFAULT_CALLBACK_PREFIX.to_string()
}

impl ClientConfig {
    /// Creates a configuration with the given key and defaults elsewhere.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            user: None,
            transport_mode: None,
            log: None,
            host: default_host(),
            callback_prefix: default_callback_prefix(),
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    #[must_use]
    pub fn with_transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = Some(log);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_callback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.callback_prefix = prefix.into();
        self
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClientError::Config(format!("invalid client config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants a client relies on.
    pub fn validate(&self) -> ClientResult<()> {
        if self.key.is_empty() {
            return Err(ClientError::Config("\"key\" param is required".to_string()));
        }
        if self.host.is_empty() {
            return Err(ClientError::Config("\"host\" param is required".to_string()));
        }
        if self.callback_prefix.is_empty() {
            return Err(ClientError::Config(
                "\"callback_prefix\" param is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Transport settings derived from a [`ClientConfig`] for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub host: String,
    pub callback_prefix: String,
    pub mode: TransportMode,
    pub key: String,
}

impl TransportSettings {
    /// Derives settings, defaulting the mode from the execution context.
    #[must_use]
    pub fn from_config(config: &ClientConfig, context: ExecutionContext) -> Self {
        let mode = config.transport_mode.unwrap_or(if context.supports_jsonp() {
            TransportMode::Jsonp
        } else {
            TransportMode::Post
        });

        Self {
            host: config.host.clone(),
            callback_prefix: config.callback_prefix.clone(),
            mode,
            key: config.key.clone(),
        }
    }
}
