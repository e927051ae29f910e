//! Feedback (analytics event) requests.

use crate::{Error, ItemId, User};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Analytics events the feedback endpoint recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackEvent {
    ClickSuggestion,
    ClickItem,
    Redirect,
    Purchase,
    AddToCart,
    UpdateCart,
    ViewPage,
}

impl FeedbackEvent {
    pub const ALL: [Self; 7] = [
        Self::ClickSuggestion,
        Self::ClickItem,
        Self::Redirect,
        Self::Purchase,
        Self::AddToCart,
        Self::UpdateCart,
        Self::ViewPage,
    ];

    /// Returns the wire name of the event.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClickSuggestion => "click-suggestion",
            Self::ClickItem => "click-item",
            Self::Redirect => "redirect",
            Self::Purchase => "purchase",
            Self::AddToCart => "add-to-cart",
            Self::UpdateCart => "update-cart",
            Self::ViewPage => "view-page",
        }
    }
}

impl fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}

/// One line of a purchase or cart update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl LineItem {
    #[must_use]
    pub fn new(item_id: impl Into<ItemId>, unit_price: f64, quantity: u32) -> Self {
        Self {
            item_id: Some(item_id.into()),
            unit_price: Some(unit_price),
            quantity: Some(quantity),
        }
    }
}

/// Feedback request.
///
/// `event` is kept as a raw string so that an unknown name can be reported
/// as such. Event-specific fields sit at the top level of the body; anything
/// else goes into `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<bool>,
    /// Request id of the response the event refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl FeedbackRequest {
    #[must_use]
    pub fn new(event: FeedbackEvent) -> Self {
        Self {
            event: Some(event.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Sets a free-form property, creating the map if needed.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
