//! Lookup table of every known [`BooruHandler`].
//!
//! Handlers are registered once, at construction, and looked up either by the hostname of a post
//! URL (auto mode) or by name. Names are compared after [normalization](normalize_handler_name),
//! so `"e621/e6ai"`, `"E621 e6ai"` and `"e621_e6ai"` all resolve to the same handler.
use ahash::HashMap;
use log::{debug, error};
use once_cell::sync::Lazy;

use crate::{
    error::ExtractorError,
    handlers::{
        aibooru::AIBooruHandler, danbooru::DanbooruHandler, e621::E621Handler,
        gelbooru::GelbooruHandler, BooruHandler,
    },
};

/// Service selector value that resolves handlers from the post URL.
pub const AUTO_SERVICE: &str = "auto";

/// Registry holding every built-in handler. Built on first use.
pub static DEFAULT_REGISTRY: Lazy<HandlerRegistry> = Lazy::new(HandlerRegistry::with_defaults);

/// Lower-cases a handler name and replaces spaces and slashes with underscores.
pub fn normalize_handler_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn BooruHandler>>,
    index: HashMap<String, usize>,
}

impl HandlerRegistry {
    /// A registry without any handler.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with all built-in handlers, in the order AIBooru, Danbooru, e621, Gelbooru.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        let defaults: [Box<dyn BooruHandler>; 4] = [
            Box::new(AIBooruHandler::new()),
            Box::new(DanbooruHandler::new()),
            Box::new(E621Handler::new()),
            Box::new(GelbooruHandler::new()),
        ];

        for handler in defaults {
            if let Err(e) = registry.register(handler) {
                error!("Failed to register built-in handler: {e}");
            }
        }

        registry
    }

    /// Adds a handler. Fails if one with the same normalized name is already registered.
    pub fn register(&mut self, handler: Box<dyn BooruHandler>) -> Result<(), ExtractorError> {
        let key = normalize_handler_name(handler.name());
        if self.index.contains_key(&key) {
            return Err(ExtractorError::DuplicateHandler {
                name: handler.name().to_string(),
            });
        }

        debug!("Registered handler {} as {key}", handler.name());
        self.index.insert(key, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    /// First handler, in registration order, whose domains match the URL's hostname.
    pub fn resolve_for_url(&self, url: &str) -> Option<&dyn BooruHandler> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(url))
            .map(AsRef::as_ref);

        match handler {
            Some(h) => debug!("Resolved {} for {url}", h.name()),
            None => debug!("No handler matches {url}"),
        }

        handler
    }

    /// Handler registered under `name`, compared after normalization.
    pub fn resolve_by_name(&self, name: &str) -> Option<&dyn BooruHandler> {
        self.index
            .get(&normalize_handler_name(name))
            .and_then(|&idx| self.handlers.get(idx))
            .map(AsRef::as_ref)
    }

    /// Selector choices: `"auto"` followed by every handler name, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.iter().map(|h| h.name().to_string()).collect();
        names.sort();
        names.insert(0, AUTO_SERVICE.to_string());
        names
    }

    /// Every handler, in registration order.
    #[inline]
    pub fn handlers(&self) -> &[Box<dyn BooruHandler>] {
        &self.handlers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
