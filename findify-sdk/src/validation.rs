//! Per-endpoint request validation.
//!
//! Each check reports only the first missing field. List fields are checked
//! one attribute at a time across the whole list: every filter's `name`
//! before any filter's `type`, every line item's `item_id` before any
//! `unit_price`. Callers with several problems therefore see them one
//! category at a time.
// TODO: collect every violation into one error once callers can consume a list.

use crate::error::{ClientError, ClientResult};
use findify_types::{
    AutocompleteRequest, CollectionRequest, FeedbackEvent, FeedbackRequest, Filter, LineItem,
    RecommendationType, RecommendationsRequest, SearchRequest, Sort,
};

fn require<T>(value: Option<&T>, field: &str) -> ClientResult<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(ClientError::missing(field)),
    }
}

fn require_all<T>(items: &[T], field: &str, present: impl Fn(&T) -> bool) -> ClientResult<()> {
    if items.iter().all(present) {
        Ok(())
    } else {
        Err(ClientError::missing(field))
    }
}

pub fn validate_autocomplete(request: &AutocompleteRequest) -> ClientResult<()> {
    require(request.q.as_ref(), "q")
}

pub fn validate_search(request: &SearchRequest) -> ClientResult<()> {
    require(request.q.as_ref(), "q")?;
    validate_results(request.filters.as_deref(), request.sort.as_deref())
}

pub fn validate_collection(request: &CollectionRequest) -> ClientResult<()> {
    require(request.slot.as_ref(), "slot")?;
    validate_results(request.filters.as_deref(), request.sort.as_deref())
}

/// Checks the list fields shared by search and collection requests.
pub fn validate_results(filters: Option<&[Filter]>, sort: Option<&[Sort]>) -> ClientResult<()> {
    if let Some(filters) = filters {
        require_all(filters, "filters[].name", |f| f.name.is_some())?;
        require_all(filters, "filters[].type", |f| f.kind.is_some())?;
    }
    if let Some(sort) = sort {
        require_all(sort, "sort[].field", |s| s.field.is_some())?;
        require_all(sort, "sort[].order", |s| s.order.is_some())?;
    }
    Ok(())
}

pub fn validate_recommendations(
    kind: RecommendationType,
    request: &RecommendationsRequest,
) -> ClientResult<()> {
    match kind {
        RecommendationType::Predefined => require(request.slot.as_ref(), "slot"),
        RecommendationType::Viewed | RecommendationType::Bought => {
            require(request.item_id.as_ref(), "item_id")
        }
        RecommendationType::Newest
        | RecommendationType::Trending
        | RecommendationType::Featured
        | RecommendationType::Latest => Ok(()),
    }
}

/// Validates a feedback request and returns its parsed event.
///
/// An unrecognized event name fails before any field is looked at.
pub fn validate_feedback(request: &FeedbackRequest) -> ClientResult<FeedbackEvent> {
    let name = request
        .event
        .as_deref()
        .ok_or_else(|| ClientError::missing("event"))?;
    let event: FeedbackEvent = name
        .parse()
        .map_err(|_| ClientError::EventNotFound(name.to_string()))?;

    match event {
        FeedbackEvent::ClickSuggestion | FeedbackEvent::Redirect => {
            require(request.rid.as_ref(), "rid")?;
            require(request.suggestion.as_ref(), "suggestion")?;
        }
        FeedbackEvent::ClickItem | FeedbackEvent::AddToCart => {
            require(request.item_id.as_ref(), "item_id")?;
        }
        FeedbackEvent::Purchase => {
            require(request.order_id.as_ref(), "order_id")?;
            require(request.currency.as_ref(), "currency")?;
            require(request.revenue.as_ref(), "revenue")?;
            let items = request
                .line_items
                .as_deref()
                .filter(|items| !items.is_empty())
                .ok_or_else(|| ClientError::missing("line_items"))?;
            validate_line_items(items)?;
        }
        FeedbackEvent::UpdateCart => {
            let items = request
                .line_items
                .as_deref()
                .ok_or_else(|| ClientError::missing("line_items"))?;
            validate_line_items(items)?;
        }
        FeedbackEvent::ViewPage => {
            require(request.url.as_ref(), "url")?;
            require(request.referrer.as_ref(), "ref")?;
            require(request.width.as_ref(), "width")?;
            require(request.height.as_ref(), "height")?;
        }
    }

    Ok(event)
}

fn validate_line_items(items: &[LineItem]) -> ClientResult<()> {
    require_all(items, "line_items[].item_id", |i| i.item_id.is_some())?;
    require_all(items, "line_items[].unit_price", |i| i.unit_price.is_some())?;
    require_all(items, "line_items[].quantity", |i| i.quantity.is_some())
}
