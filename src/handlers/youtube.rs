use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::link::ServiceLink;
use super::traits::LinkHandler;
use super::url_parts::{query_param, segments};

static HOST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^((www|m|music)\.)?youtube\.com$").unwrap(),
        Regex::new(r"^(www\.)?youtube-nocookie\.com$").unwrap(),
        Regex::new(r"^youtu\.be$").unwrap(),
    ]
});

/// Path prefixes that carry the video id as the second segment.
const VIDEO_PATH_PREFIXES: &[&str] = &["embed", "shorts", "v"];

const FEED_PATH: &str = "/feeds/videos.xml";

/// Single YouTube videos: watch pages, short links, embeds and shorts.
pub struct YouTubeVideoHandler;

impl YouTubeVideoHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for YouTubeVideoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for YouTubeVideoHandler {
    fn handler_id(&self) -> &'static str {
        "youtube_video"
    }

    fn host_patterns(&self) -> &[Regex] {
        &HOST_PATTERNS
    }

    fn priority(&self) -> i32 {
        100
    }

    fn extract(&self, url: &Url) -> Option<ServiceLink> {
        extract_video_id(url).map(|video_id| ServiceLink::YouTubeVideo { video_id })
    }
}

/// Extract a YouTube video id.
///
/// `youtu.be` short links only ever carry the id in the path. Elsewhere the
/// `v` query parameter takes precedence over `/embed/`, `/shorts/` and `/v/`.
#[must_use]
pub fn extract_video_id(url: &Url) -> Option<String> {
    let parts = segments(url);

    if url.host_str() == Some("youtu.be") {
        return parts.first().map(ToString::to_string);
    }

    if let Some(id) = query_param(url, "v") {
        return Some(id);
    }

    match parts.as_slice() {
        [prefix, id, ..] if VIDEO_PATH_PREFIXES.contains(prefix) => Some((*id).to_string()),
        _ => None,
    }
}

/// YouTube channels, by `/channel/<id>` page or by uploads feed URL.
pub struct YouTubeChannelHandler;

impl YouTubeChannelHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for YouTubeChannelHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for YouTubeChannelHandler {
    fn handler_id(&self) -> &'static str {
        "youtube_channel"
    }

    fn host_patterns(&self) -> &[Regex] {
        &HOST_PATTERNS
    }

    fn priority(&self) -> i32 {
        90
    }

    fn extract(&self, url: &Url) -> Option<ServiceLink> {
        extract_channel_id(url).map(|channel_id| ServiceLink::YouTubeChannel { channel_id })
    }
}

/// Extract a YouTube channel id from a channel page or an uploads feed.
#[must_use]
pub fn extract_channel_id(url: &Url) -> Option<String> {
    if let ["channel", id, ..] = segments(url).as_slice() {
        return Some((*id).to_string());
    }

    if url.host_str() == Some("www.youtube.com") && url.path() == FEED_PATH {
        return query_param(url, "channel_id");
    }

    None
}
