use std::cmp::Reverse;

use super::link::{Classification, ServiceLink};
use super::traits::LinkHandler;
use super::url_parts;

/// Ordered list of link handlers.
///
/// Handlers are kept sorted by priority, highest first; equal priorities
/// keep registration order. The first handler that extracts an identifier
/// wins.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn LinkHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Box<dyn LinkHandler>) {
        self.handlers.push(handler);
        // Stable sort, so ties stay in registration order
        self.handlers.sort_by_key(|h| Reverse(h.priority()));
    }

    /// Find the handler that claims a URL, along with what it extracted.
    #[must_use]
    pub fn find_handler(&self, url: &str) -> Option<(&dyn LinkHandler, ServiceLink)> {
        let parsed = url_parts::parse(url)?;
        self.handlers
            .iter()
            .find_map(|h| h.handle(&parsed).map(|link| (&**h, link)))
    }

    /// Classify a URL. Never fails; unknown or malformed input is `Unhandled`.
    #[must_use]
    pub fn classify(&self, url: &str) -> Classification {
        match self.find_handler(url) {
            Some((handler, link)) => {
                tracing::debug!(url, handler = handler.handler_id(), "link classified");
                Classification::Handled(link)
            }
            None => Classification::Unhandled,
        }
    }

    /// Get all registered handlers, in dispatch order.
    #[must_use]
    pub fn handlers(&self) -> &[Box<dyn LinkHandler>] {
        &self.handlers
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
