//! URL composition helpers.

/// Joins a host and an endpoint path with exactly one slash between them.
///
/// A single trailing slash on `host` and a single leading slash on `path`
/// are dropped before joining.
#[must_use]
pub fn resolve_url(host: &str, path: &str) -> String {
    let host = host.strip_suffix('/').unwrap_or(host);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{host}/{path}")
}

/// Appends an encoded query string, respecting any query already present.
#[must_use]
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Percent-encodes a value for use as a single path segment.
#[must_use]
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
