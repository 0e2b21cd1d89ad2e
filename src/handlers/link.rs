use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

const YOUTUBE_BASE: &str = "https://www.youtube.com";
const ODYSEE_BASE: &str = "https://odysee.com";
const REDDIT_BASE: &str = "https://www.reddit.com";

/// External service a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Service {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "odysee")]
    Odysee,
    #[serde(rename = "reddit")]
    Reddit,
}

impl Service {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Odysee => "odysee",
            Self::Reddit => "reddit",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a link points at a single video or at a channel-like collection.
///
/// Subreddits count as channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Video,
    Channel,
}

impl LinkKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Channel => "channel",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL recognised as content on a known service.
///
/// Built only by the handlers; every derived URL is a pure function of the
/// identifiers carried here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceLink {
    YouTubeVideo {
        video_id: String,
    },
    YouTubeChannel {
        channel_id: String,
    },
    /// Odysee claim. The `@channel:x` segment is optional in share links,
    /// so the channel may be unknown.
    OdyseeVideo {
        video_id: String,
        channel_id: Option<String>,
    },
    OdyseeChannel {
        channel_id: String,
    },
    Subreddit {
        subreddit: String,
    },
}

impl ServiceLink {
    #[must_use]
    pub const fn service(&self) -> Service {
        match self {
            Self::YouTubeVideo { .. } | Self::YouTubeChannel { .. } => Service::YouTube,
            Self::OdyseeVideo { .. } | Self::OdyseeChannel { .. } => Service::Odysee,
            Self::Subreddit { .. } => Service::Reddit,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> LinkKind {
        match self {
            Self::YouTubeVideo { .. } | Self::OdyseeVideo { .. } => LinkKind::Video,
            Self::YouTubeChannel { .. } | Self::OdyseeChannel { .. } | Self::Subreddit { .. } => {
                LinkKind::Channel
            }
        }
    }

    /// Identifiers keyed by role (`videoId`, `channelId`, `subreddit`).
    #[must_use]
    pub fn identifiers(&self) -> BTreeMap<&'static str, &str> {
        let mut ids = BTreeMap::new();
        match self {
            Self::YouTubeVideo { video_id } => {
                ids.insert("videoId", video_id.as_str());
            }
            Self::YouTubeChannel { channel_id } | Self::OdyseeChannel { channel_id } => {
                ids.insert("channelId", channel_id.as_str());
            }
            Self::OdyseeVideo {
                video_id,
                channel_id,
            } => {
                ids.insert("videoId", video_id.as_str());
                if let Some(channel_id) = channel_id {
                    ids.insert("channelId", channel_id.as_str());
                }
            }
            Self::Subreddit { subreddit } => {
                ids.insert("subreddit", subreddit.as_str());
            }
        }
        ids
    }

    /// Preferred URL for the identified resource.
    ///
    /// `None` only for an Odysee video whose channel is unknown.
    #[must_use]
    pub fn canonical_url(&self) -> Option<String> {
        match self {
            Self::YouTubeVideo { video_id } => Some(format!("{YOUTUBE_BASE}/watch?v={video_id}")),
            Self::YouTubeChannel { channel_id } => {
                Some(format!("{YOUTUBE_BASE}/channel/{channel_id}"))
            }
            Self::OdyseeVideo {
                video_id,
                channel_id,
            } => channel_id
                .as_ref()
                .map(|channel_id| format!("{ODYSEE_BASE}/{channel_id}/{video_id}")),
            Self::OdyseeChannel { channel_id } => Some(format!("{ODYSEE_BASE}/{channel_id}")),
            Self::Subreddit { subreddit } => Some(format!("{REDDIT_BASE}/r/{subreddit}/")),
        }
    }

    /// Syndication feeds associated with the resource.
    #[must_use]
    pub fn feeds(&self) -> Vec<String> {
        match self {
            Self::YouTubeVideo { .. } => Vec::new(),
            Self::YouTubeChannel { channel_id } => {
                vec![format!("{YOUTUBE_BASE}/feeds/videos.xml?channel_id={channel_id}")]
            }
            Self::OdyseeVideo { channel_id, .. } => channel_id
                .iter()
                .map(|channel_id| odysee_feed(channel_id))
                .collect(),
            Self::OdyseeChannel { channel_id } => vec![odysee_feed(channel_id)],
            Self::Subreddit { subreddit } => vec![format!("{REDDIT_BASE}/r/{subreddit}/.rss")],
        }
    }

    /// Iframe-embeddable URL. Videos only.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::YouTubeVideo { video_id } => Some(format!("{YOUTUBE_BASE}/embed/{video_id}")),
            Self::OdyseeVideo { video_id, .. } => Some(format!("{ODYSEE_BASE}/$/embed/{video_id}")),
            Self::YouTubeChannel { .. } | Self::OdyseeChannel { .. } | Self::Subreddit { .. } => {
                None
            }
        }
    }

    /// Equivalent URL forms for the resource. Currently just the canonical URL.
    #[must_use]
    pub fn link_versions(&self) -> Vec<String> {
        self.canonical_url().into_iter().collect()
    }

    /// URL of the channel (or subreddit) this resource belongs to.
    ///
    /// A YouTube video needs a page fetch to learn its channel, so it yields `None`.
    #[must_use]
    pub fn channel_url(&self) -> Option<String> {
        match self {
            Self::YouTubeVideo { .. } => None,
            Self::OdyseeVideo { channel_id, .. } => channel_id
                .as_ref()
                .map(|channel_id| format!("{ODYSEE_BASE}/{channel_id}")),
            Self::YouTubeChannel { .. } | Self::OdyseeChannel { .. } | Self::Subreddit { .. } => {
                self.canonical_url()
            }
        }
    }

    #[must_use]
    pub fn derived_links(&self) -> DerivedLinks {
        DerivedLinks {
            canonical_url: self.canonical_url(),
            alternate_urls: self.link_versions(),
            feed_urls: self.feeds(),
            embed_url: self.embed_url(),
        }
    }
}

fn odysee_feed(channel_id: &str) -> String {
    format!("{ODYSEE_BASE}/$/rss/{channel_id}")
}

/// Everything a renderer needs to build view menus and previews for a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedLinks {
    pub canonical_url: Option<String>,
    pub alternate_urls: Vec<String>,
    pub feed_urls: Vec<String>,
    pub embed_url: Option<String>,
}

/// Outcome of classifying a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a known service, or not a parseable URL at all.
    Unhandled,
    Handled(ServiceLink),
}

impl Classification {
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    #[must_use]
    pub const fn link(&self) -> Option<&ServiceLink> {
        match self {
            Self::Handled(link) => Some(link),
            Self::Unhandled => None,
        }
    }

    #[must_use]
    pub fn into_link(self) -> Option<ServiceLink> {
        match self {
            Self::Handled(link) => Some(link),
            Self::Unhandled => None,
        }
    }
}

impl From<Option<ServiceLink>> for Classification {
    fn from(link: Option<ServiceLink>) -> Self {
        link.map_or(Self::Unhandled, Self::Handled)
    }
}
