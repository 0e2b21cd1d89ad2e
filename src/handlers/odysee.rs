use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::link::ServiceLink;
use super::traits::LinkHandler;
use super::url_parts::segments;

static HOST_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^(www\.)?odysee\.com$").unwrap()]);

/// Odysee claims (`/@channel:x/claim:y`, `/claim:y`, `/$/embed/claim:y`).
pub struct OdyseeVideoHandler;

impl OdyseeVideoHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for OdyseeVideoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for OdyseeVideoHandler {
    fn handler_id(&self) -> &'static str {
        "odysee_video"
    }

    fn host_patterns(&self) -> &[Regex] {
        &HOST_PATTERNS
    }

    fn priority(&self) -> i32 {
        80
    }

    fn extract(&self, url: &Url) -> Option<ServiceLink> {
        let parts = segments(url);
        let video_id = video_segment(&parts)?;
        Some(ServiceLink::OdyseeVideo {
            video_id: video_id.to_string(),
            channel_id: claimed_channel_segment(&parts).map(ToString::to_string),
        })
    }
}

/// Odysee channel pages (`/@channel` or `/@channel:x`).
pub struct OdyseeChannelHandler;

impl OdyseeChannelHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for OdyseeChannelHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for OdyseeChannelHandler {
    fn handler_id(&self) -> &'static str {
        "odysee_channel"
    }

    fn host_patterns(&self) -> &[Regex] {
        &HOST_PATTERNS
    }

    fn priority(&self) -> i32 {
        70
    }

    fn extract(&self, url: &Url) -> Option<ServiceLink> {
        segments(url)
            .into_iter()
            .find(|s| is_channel_segment(s))
            .map(|channel_id| ServiceLink::OdyseeChannel {
                channel_id: channel_id.to_string(),
            })
    }
}

fn is_channel_segment(segment: &str) -> bool {
    segment.len() > 1 && segment.starts_with('@')
}

/// The last segment, when it is a claim (`name:id`) rather than a channel.
fn video_segment<'a>(parts: &[&'a str]) -> Option<&'a str> {
    parts
        .last()
        .copied()
        .filter(|s| s.contains(':') && !s.starts_with('@'))
}

/// First `@name:id` segment. A bare `@name` is not enough to address a claim.
fn claimed_channel_segment<'a>(parts: &[&'a str]) -> Option<&'a str> {
    parts
        .iter()
        .copied()
        .find(|s| is_channel_segment(s) && s.contains(':'))
}
