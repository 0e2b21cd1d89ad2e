//! Link classification for feed and bookmark readers.
//!
//! Recognises links to YouTube, Odysee and Reddit, extracts their
//! identifiers, and derives canonical, feed and embed URLs. Raw links can be
//! cleaned of redirect wrappers first with [`sanitize::sanitize_link`].

pub mod config;
pub mod handlers;
pub mod report;
pub mod sanitize;

pub use handlers::{classify, resolve_channel_url, Classification, DerivedLinks, LinkKind, Service, ServiceLink};
pub use sanitize::{sanitize_link, strip_tracking_params};
