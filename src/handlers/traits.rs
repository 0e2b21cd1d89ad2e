use regex::Regex;
use url::Url;

use super::link::ServiceLink;

/// One URL convention of one external service.
///
/// Handlers are pure: they read only the parsed URL and their own constant
/// tables.
pub trait LinkHandler: Send + Sync {
    /// Unique identifier for this handler.
    fn handler_id(&self) -> &'static str;

    /// Hostnames this handler accepts, matched against the lowercase host.
    fn host_patterns(&self) -> &[Regex];

    /// Check if the URL's host belongs to this handler's service.
    fn matches_host(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| self.host_patterns().iter().any(|p| p.is_match(host)))
    }

    /// Priority for dispatch order (higher = tried first).
    fn priority(&self) -> i32 {
        0
    }

    /// Pull identifiers out of a URL already known to be on this service.
    fn extract(&self, url: &Url) -> Option<ServiceLink>;

    /// Classify `url` if this handler recognises it.
    fn handle(&self, url: &Url) -> Option<ServiceLink> {
        if self.matches_host(url) {
            self.extract(url)
        } else {
            None
        }
    }
}
