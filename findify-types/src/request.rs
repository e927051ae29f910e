//! Per-operation request records.

use crate::{Error, ItemId, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A facet filter applied to search or collection results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Facet type, e.g. `text`, `range`, `category`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FilterValue>>,
}

impl Filter {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
            values: None,
        }
    }

    /// Adds a selected value to the filter.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.get_or_insert_with(Vec::new).push(FilterValue {
            value: Some(value.into()),
            ..Default::default()
        });
        self
    }

    /// Adds a range to the filter.
    #[must_use]
    pub fn with_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.values.get_or_insert_with(Vec::new).push(FilterValue {
            value: None,
            from: Some(from.into()),
            to: Some(to.into()),
        });
        self
    }
}

/// One selected value (or range) of a [`Filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// A sort instruction for search or collection results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// `asc` or `desc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl Sort {
    #[must_use]
    pub fn new(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            order: Some(order.into()),
        }
    }
}

/// Autocomplete request. `q` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Per-call identity, overriding the client's session user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Per-call override of the client's logging flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_limit: Option<u32>,
}

impl AutocompleteRequest {
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }
}

/// Full-text search request. `q` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }
}

/// Collection browse request. `slot` is required and travels in the URL
/// path, never in the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    #[serde(default, skip_serializing)]
    pub slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Sort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl CollectionRequest {
    #[must_use]
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: Some(slot.into()),
            ..Default::default()
        }
    }
}

/// Recommendations request.
///
/// `slot` is required for [`RecommendationType::Predefined`] and is a path
/// parameter, never serialized into the body. `item_id` is required for
/// [`RecommendationType::Viewed`] and [`RecommendationType::Bought`], which
/// carry it in the path; other types send it in the body when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsRequest {
    #[serde(default, skip_serializing)]
    pub slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl RecommendationsRequest {
    /// Request for a merchant-configured recommendation slot.
    #[must_use]
    pub fn for_slot(slot: impl Into<String>) -> Self {
        Self {
            slot: Some(slot.into()),
            ..Default::default()
        }
    }

    /// Request for items related to a given product.
    #[must_use]
    pub fn for_item(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            ..Default::default()
        }
    }
}

/// Kind of recommendation to fetch.
///
/// `Predefined` was called `generic` by earlier service revisions; both
/// names parse to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    #[serde(alias = "generic")]
    Predefined,
    Newest,
    Trending,
    Featured,
    Latest,
    Viewed,
    Bought,
}

impl RecommendationType {
    /// All recommendation types, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Predefined,
        Self::Newest,
        Self::Trending,
        Self::Featured,
        Self::Latest,
        Self::Viewed,
        Self::Bought,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Predefined => "predefined",
            Self::Newest => "newest",
            Self::Trending => "trending",
            Self::Featured => "featured",
            Self::Latest => "latest",
            Self::Viewed => "viewed",
            Self::Bought => "bought",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "generic" {
            return Ok(Self::Predefined);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownRecommendationType(s.to_string()))
    }
}
