//! Small URL accessors shared by the handlers.
//!
//! Parsing failure is an ordinary outcome here: callers get `None` and treat
//! the input as unclassifiable.

use url::Url;

/// Parse an absolute URL, returning `None` for anything `Url` rejects.
#[must_use]
pub fn parse(input: &str) -> Option<Url> {
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!(input, error = %e, "not a parseable URL");
            None
        }
    }
}

/// Non-empty path segments, still percent-encoded.
#[must_use]
pub fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|parts| parts.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// First non-empty value of query parameter `name`, percent-decoded.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
