//! Query-string serialization for the GET transport.
//!
//! Nested values use bracket notation (`user[uid]=u1`,
//! `filters[0][name]=color`). Keys and values are percent-encoded per
//! RFC 3986, so the brackets themselves are encoded on the wire.

use serde_json::Value;

/// Serializes a JSON object into an encoded query string.
///
/// Non-object values produce an empty string. Nulls render with an empty
/// value; empty arrays and objects render nothing.
#[must_use]
pub fn stringify(value: &Value) -> String {
    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        for (key, value) in map {
            flatten(key.clone(), value, &mut pairs);
        }
    }

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// UTF-8 byte length of an encoded query string.
#[must_use]
pub fn byte_len(query: &str) -> usize {
    query.len()
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => out.push((prefix, String::new())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}
