use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::link::ServiceLink;
use super::traits::LinkHandler;
use super::url_parts::segments;

static HOST_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^((www|old|new|m|np)\.)?reddit\.com$").unwrap()]);

/// Subreddits, including any post or listing URL below `/r/<name>/`.
pub struct RedditHandler;

impl RedditHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RedditHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for RedditHandler {
    fn handler_id(&self) -> &'static str {
        "reddit"
    }

    fn host_patterns(&self) -> &[Regex] {
        &HOST_PATTERNS
    }

    fn priority(&self) -> i32 {
        60
    }

    fn extract(&self, url: &Url) -> Option<ServiceLink> {
        match segments(url).as_slice() {
            ["r", subreddit, ..] => Some(ServiceLink::Subreddit {
                subreddit: (*subreddit).to_string(),
            }),
            _ => None,
        }
    }
}
