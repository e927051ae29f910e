//! Response bodies.
//!
//! Every struct deserializes leniently: missing fields fall back to their
//! defaults so that additions and omissions on the service side do not turn
//! a successful call into a decode error.

use crate::{Filter, Sort};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product as returned by the service. Only `id` is guaranteed; every
/// other attribute is merchant-defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redirect {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerProducts {
    pub image_url: String,
    pub target_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub products: BannerProducts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetValue {
    pub selected: bool,
    pub value: String,
    pub count: u64,
    pub name: String,
    pub has_children: bool,
    pub min: f64,
    pub max: f64,
    pub from: f64,
    pub to: f64,
    pub children: Vec<FacetValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sort_type: String,
    pub values: Vec<FacetValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSuggestion {
    pub value: String,
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteMeta {
    pub rid: String,
    pub q: String,
    pub suggestion_limit: u32,
    pub item_limit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<AutocompleteSuggestion>,
    pub items: Vec<Product>,
    pub meta: AutocompleteMeta,
}

/// Meta block shared by search and collection responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsMeta {
    pub rid: String,
    pub filters: Vec<Filter>,
    pub sort: Vec<Sort>,
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub meta: ResultsMeta,
    pub items: Vec<Product>,
    pub facets: Vec<Facet>,
    /// Set when the query matched a merchant redirect rule.
    pub redirect: Option<Redirect>,
    pub banner: Option<Banner>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionResponse {
    pub meta: ResultsMeta,
    pub items: Vec<Product>,
    pub facets: Vec<Facet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsMeta {
    pub rid: String,
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
    pub item_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationsResponse {
    pub meta: RecommendationsMeta,
    pub items: Vec<Product>,
}
