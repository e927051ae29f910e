//! Request and response types for the Findify search API.
//!
//! This crate defines the plain data shapes exchanged with the service:
//! - The end-user identity (`User`) attached to every data request
//! - Per-operation request records (autocomplete, search, collection,
//!   recommendations, feedback)
//! - Typed response bodies
//!
//! Fields the service requires are still modelled as `Option` here. Presence
//! is checked by the client before anything goes on the wire, so a missing
//! field surfaces as a validation error naming it rather than a serde error.

mod feedback;
mod ids;
mod request;
mod response;
mod user;

pub use feedback::{FeedbackEvent, FeedbackRequest, LineItem};
pub use ids::ItemId;
pub use request::{
    AutocompleteRequest, CollectionRequest, Filter, FilterValue, RecommendationType,
    RecommendationsRequest, SearchRequest, Sort,
};
pub use response::{
    AutocompleteMeta, AutocompleteResponse, AutocompleteSuggestion, Banner, BannerProducts,
    CollectionResponse, Facet, FacetValue, Product, RecommendationsMeta, RecommendationsResponse,
    Redirect, ResultsMeta, SearchResponse,
};
pub use user::User;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing type names.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("event not found: {0}")]
    UnknownEvent(String),

    #[error("unknown recommendation type: {0}")]
    UnknownRecommendationType(String),
}
