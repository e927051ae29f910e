//! Client for the Findify search and recommendation API.
//!
//! Exposes one method per service operation (autocomplete, search,
//! collection, recommendations, feedback) and takes care of:
//! - Validating required request fields per operation
//! - Merging the session identity and logging flag into each request and
//!   stamping the client timestamp
//! - Choosing between JSON-over-POST and JSONP for each call
//!
//! # Error channels
//!
//! Client methods return `Result<ApiCall<T>, ClientError>`. Every
//! configuration, validation, identity and environment problem is reported
//! in that outer result, before any network I/O. The [`ApiCall`] itself is a
//! future that yields `Result<T, TransportError>`.
//!
//! # Example
//!
//! ```no_run
//! use findify_sdk::{ClientConfig, FindifyClient, TransportMode};
//! use findify_types::{SearchRequest, User};
//!
//! # async fn run() -> findify_sdk::Result<()> {
//! let config = ClientConfig::new("merchant-key")
//!     .with_user(User::new("visitor-1", "session-1"))
//!     .with_transport_mode(TransportMode::Post);
//! let client = FindifyClient::new(config)?;
//!
//! let response = client.search(SearchRequest::new("red shoes"))?.await?;
//! println!("{} results", response.meta.total);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod normalize;
pub mod query;
pub mod transport;
pub mod url;
pub mod validation;

pub use client::{ApiCall, ClientBuilder, FindifyClient};
pub use config::{
    ClientConfig, DEFAULT_CALLBACK_PREFIX, DEFAULT_HOST, ExecutionContext, TransportMode,
    TransportSettings,
};
pub use error::{
    ClientError, ClientResult, Error, IdentityError, Result, TransportError, TransportResult,
};
pub use normalize::{ApiRequest, ResolvedRequest, resolve, resolve_at};
pub use transport::{
    DispatchPlan, HttpTransport, JSONP_TIMEOUT, MAX_QUERY_BYTES, Transport, WireMethod,
};
