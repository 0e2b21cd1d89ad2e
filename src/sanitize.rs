//! Link sanitation: strip redirect wrappers, whitespace and tracking noise
//! from raw links before they are classified or stored.

use url::{form_urlencoded, Url};

use crate::handlers::url_parts::{self, query_param};

/// A service that wraps the real destination in one of its query parameters.
struct Redirector {
    name: &'static str,
    /// Substring the host must contain.
    host: &'static str,
    /// Exact path the redirect endpoint lives at, if it has a fixed one.
    path: Option<&'static str>,
    /// Parameters holding the destination, first non-empty wins.
    params: &'static [&'static str],
}

/// Applied in this order on every pass.
const REDIRECTORS: &[Redirector] = &[
    Redirector {
        name: "google",
        host: "google.",
        path: Some("/url"),
        params: &["q", "url"],
    },
    Redirector {
        name: "youtube",
        host: "youtube.com",
        path: Some("/redirect"),
        params: &["q"],
    },
    Redirector {
        name: "safelinks",
        host: "safelinks.protection.outlook.com",
        path: None,
        params: &["url"],
    },
];

impl Redirector {
    fn unwrap(&self, link: &str) -> Option<String> {
        if !link.contains(self.host) {
            return None;
        }
        let url = Url::parse(link).ok()?;
        if !url.host_str().is_some_and(|host| host.contains(self.host)) {
            return None;
        }
        if self.path.is_some_and(|path| url.path() != path) {
            return None;
        }
        self.params.iter().find_map(|param| query_param(&url, param))
    }
}

/// Tracking parameters dropped by [`strip_tracking_params`].
const TRACKING_PARAMS: &[&str] = &[
    "fbclid",
    "gclid",
    "gclsrc",
    "dclid",
    "msclkid",
    "mc_cid",
    "mc_eid",
    "igshid",
    "si",
    "feature",
    "ref_src",
    "ref_url",
];

/// Clean a raw link: trim it and unwrap search-engine, video-platform and
/// mail safe-link redirects, in that order.
///
/// Input without a known wrapper comes back trimmed and otherwise unchanged.
/// Nested wrappers are peeled until none is left, so the result is stable
/// under a second application.
#[must_use]
pub fn sanitize_link(raw: &str) -> String {
    // Every unwrap yields part of the current query, so the link only shrinks
    let mut link = raw.trim().to_string();
    loop {
        let next = sanitize_pass(&link);
        if next == link {
            return link;
        }
        link = next;
    }
}

fn sanitize_pass(link: &str) -> String {
    let mut current = link.trim_end().to_string();
    for redirector in REDIRECTORS {
        if let Some(target) = redirector.unwrap(&current) {
            tracing::trace!(from = %current, to = %target, redirector = redirector.name, "unwrapped redirect");
            current = target;
        }
    }
    current.trim().to_string()
}

/// Remove well-known tracking parameters from an http(s) URL.
///
/// Other parameters keep their order and their original encoding. Anything
/// that is not an http(s) URL, or carries no tracking parameter, is returned
/// unchanged.
#[must_use]
pub fn strip_tracking_params(link: &str) -> String {
    let Some(mut url) = url_parts::parse(link) else {
        return link.to_string();
    };
    if !matches!(url.scheme(), "http" | "https") {
        return link.to_string();
    }
    let Some(query) = url.query() else {
        return link.to_string();
    };

    let pieces: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
    let kept: Vec<&str> = pieces
        .iter()
        .copied()
        .filter(|piece| !piece_key(piece).is_some_and(|key| is_tracking_param(&key)))
        .collect();

    if kept.len() == pieces.len() {
        return link.to_string();
    }

    let kept = kept.join("&");
    url.set_query((!kept.is_empty()).then_some(kept.as_str()));
    url.into()
}

/// Decoded key of one raw `key=value` query piece.
fn piece_key(piece: &str) -> Option<String> {
    form_urlencoded::parse(piece.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
}

fn is_tracking_param(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.starts_with("utm_") || TRACKING_PARAMS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_redirect() {
        assert_eq!(
            sanitize_link("https://www.google.com/url?q=https://real.site/x "),
            "https://real.site/x"
        );
        assert_eq!(
            sanitize_link("https://www.google.com/url?sa=t&url=https%3A%2F%2Freal.site%2Fy"),
            "https://real.site/y"
        );
    }

    #[test]
    fn test_google_non_redirect_untouched() {
        let search = "https://www.google.com/search?q=rust";
        assert_eq!(sanitize_link(search), search);
    }

    #[test]
    fn test_youtube_redirect() {
        assert_eq!(
            sanitize_link(
                "https://www.youtube.com/redirect?event=video_description&q=https%3A%2F%2Fexample.com%2Fpage%3Fa%3D1&v=abc"
            ),
            "https://example.com/page?a=1"
        );
    }

    #[test]
    fn test_youtube_watch_untouched() {
        let watch = "https://www.youtube.com/watch?v=abc&q=ignored";
        assert_eq!(sanitize_link(watch), watch);
    }

    #[test]
    fn test_safelinks() {
        assert_eq!(
            sanitize_link(
                "https://eur01.safelinks.protection.outlook.com/?url=https%3A%2F%2Fexample.com%2Fdoc&data=05%7C01&reserved=0"
            ),
            "https://example.com/doc"
        );
    }

    #[test]
    fn test_redirect_without_target_untouched() {
        let bare = "https://www.google.com/url?sa=t";
        assert_eq!(sanitize_link(bare), bare);
    }

    #[test]
    fn test_nested_redirects() {
        let nested = "https://www.google.com/url?q=https%3A%2F%2Fwww.google.com%2Furl%3Fq%3Dhttps%253A%252F%252Freal.site%252Fz";
        assert_eq!(sanitize_link(nested), "https://real.site/z");
    }

    #[test]
    fn test_whitespace_and_garbage() {
        assert_eq!(sanitize_link("  https://example.com/a \n"), "https://example.com/a");
        assert_eq!(sanitize_link(""), "");
        assert_eq!(sanitize_link("not a url"), "not a url");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://www.google.com/url?q=https://real.site/x ",
            "https://www.youtube.com/redirect?q=https%3A%2F%2Fexample.com%2F",
            "https://nam02.safelinks.protection.outlook.com/?url=https%3A%2F%2Fexample.com",
            "https://example.com/plain",
            "   ",
        ];
        for input in inputs {
            let once = sanitize_link(input);
            assert_eq!(sanitize_link(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_strip_tracking_params() {
        assert_eq!(
            strip_tracking_params("https://example.com/path?utm_source=x&id=123&fbclid=abc"),
            "https://example.com/path?id=123"
        );
        assert_eq!(
            strip_tracking_params("https://youtu.be/abc123?si=share"),
            "https://youtu.be/abc123"
        );
    }

    #[test]
    fn test_deeply_nested_redirects() {
        let mut link = "https://real.site/x".to_string();
        for _ in 0..10 {
            link = format!(
                "https://www.google.com/url?q={}",
                form_urlencoded::byte_serialize(link.as_bytes()).collect::<String>()
            );
        }
        let once = sanitize_link(&link);
        assert_eq!(once, "https://real.site/x");
        assert_eq!(sanitize_link(&once), once);
    }

    #[test]
    fn test_strip_tracking_params_keeps_encoding() {
        assert_eq!(
            strip_tracking_params("https://example.com/login?next=/a/b&utm_campaign=x&q=a+b"),
            "https://example.com/login?next=/a/b&q=a+b"
        );
        assert_eq!(
            strip_tracking_params("https://example.com/?UTM_Source=x&flag"),
            "https://example.com/?flag"
        );
    }

    #[test]
    fn test_strip_tracking_params_keeps_clean_urls() {
        let clean = "https://www.youtube.com/watch?v=abc&t=42";
        assert_eq!(strip_tracking_params(clean), clean);
        assert_eq!(strip_tracking_params("not a url"), "not a url");
        assert_eq!(
            strip_tracking_params("mailto:a@example.com?utm_source=x"),
            "mailto:a@example.com?utm_source=x"
        );
    }
}
