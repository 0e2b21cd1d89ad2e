mod link;
mod registry;
mod traits;
pub(crate) mod url_parts;

// Site handlers
mod odysee;
mod reddit;
pub mod youtube;

pub use link::{Classification, DerivedLinks, LinkKind, Service, ServiceLink};
pub use registry::HandlerRegistry;
pub use traits::LinkHandler;

/// Global handler registry.
///
/// Video handlers outrank channel handlers of the same service, so a more
/// specific match always wins.
pub static HANDLERS: std::sync::LazyLock<HandlerRegistry> = std::sync::LazyLock::new(|| {
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(youtube::YouTubeVideoHandler::new()));
    registry.register(Box::new(youtube::YouTubeChannelHandler::new()));
    registry.register(Box::new(odysee::OdyseeVideoHandler::new()));
    registry.register(Box::new(odysee::OdyseeChannelHandler::new()));
    registry.register(Box::new(reddit::RedditHandler::new()));
    registry
});

/// Classify a URL against the built-in handlers.
#[must_use]
pub fn classify(url: &str) -> Classification {
    HANDLERS.classify(url)
}

/// Channel (or subreddit) URL for whatever `url` points at, if known.
#[must_use]
pub fn resolve_channel_url(url: &str) -> Option<String> {
    classify(url).link().and_then(ServiceLink::channel_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_order() {
        let ids: Vec<_> = HANDLERS.handlers().iter().map(|h| h.handler_id()).collect();
        assert_eq!(
            ids,
            vec![
                "youtube_video",
                "youtube_channel",
                "odysee_video",
                "odysee_channel",
                "reddit"
            ]
        );
    }

    #[test]
    fn test_feed_url_is_a_channel_not_a_video() {
        let (handler, _) = HANDLERS
            .find_handler("https://www.youtube.com/feeds/videos.xml?channel_id=UC999")
            .unwrap();
        assert_eq!(handler.handler_id(), "youtube_channel");
    }

    #[test]
    fn test_odysee_video_wins_over_channel() {
        let (handler, _) = HANDLERS
            .find_handler("https://odysee.com/@samtime:1/clip:1")
            .unwrap();
        assert_eq!(handler.handler_id(), "odysee_video");
    }

    #[test]
    fn test_resolve_channel_url() {
        assert_eq!(
            resolve_channel_url("https://odysee.com/@samtime:1/clip:1").as_deref(),
            Some("https://odysee.com/@samtime:1")
        );
        assert_eq!(
            resolve_channel_url("https://www.reddit.com/r/rust/comments/abc/").as_deref(),
            Some("https://www.reddit.com/r/rust/")
        );
        assert_eq!(resolve_channel_url("https://youtu.be/abc123"), None);
        assert_eq!(resolve_channel_url("https://example.com/"), None);
    }
}
