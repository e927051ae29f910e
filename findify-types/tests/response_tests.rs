use findify_types::{AutocompleteResponse, RecommendationsResponse, SearchResponse};
use serde_json::json;

#[test]
fn search_response_tolerates_missing_fields() {
    let response: SearchResponse = serde_json::from_value(json!({
        "meta": { "rid": "r1", "total": 2 },
        "items": [{ "id": "p1", "title": "Red shoe", "price": [10.5] }, { "id": "p2" }]
    }))
    .unwrap();

    assert_eq!(response.meta.rid, "r1");
    assert_eq!(response.meta.total, 2);
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].attributes["title"], json!("Red shoe"));
    assert!(response.facets.is_empty());
    assert!(response.redirect.is_none());
}

#[test]
fn search_response_with_redirect() {
    let response: SearchResponse = serde_json::from_value(json!({
        "redirect": { "name": "sale", "url": "https://shop.example/sale" }
    }))
    .unwrap();
    assert_eq!(response.redirect.unwrap().url, "https://shop.example/sale");
}

#[test]
fn autocomplete_response_parses_suggestions() {
    let response: AutocompleteResponse = serde_json::from_value(json!({
        "suggestions": [{ "value": "shoes" }, { "value": "shirts" }],
        "items": [],
        "meta": { "rid": "r2", "q": "sh", "suggestion_limit": 2, "item_limit": 0 }
    }))
    .unwrap();
    assert_eq!(response.suggestions.len(), 2);
    assert_eq!(response.meta.q, "sh");
}

#[test]
fn recommendations_response_item_id_optional() {
    let response: RecommendationsResponse =
        serde_json::from_value(json!({ "meta": { "rid": "r3" }, "items": [] })).unwrap();
    assert!(response.meta.item_id.is_none());
    assert!(response.items.is_empty());
}
