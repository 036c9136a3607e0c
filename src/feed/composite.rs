//! Loaders built out of other loaders
//!
//! `FeedLoaderWithFallback` tries a primary source and falls back to a second
//! one on failure (network first, cache second). `FeedLoaderCacheDecorator`
//! saves every successfully loaded feed into a `FeedCache`.

use std::sync::Arc;

use log::debug;

use super::{FeedCache, FeedLoader, LoadCompletion};

/// Loads from `primary`, and from `fallback` only if `primary` fails
pub struct FeedLoaderWithFallback {
    primary: Arc<dyn FeedLoader>,
    fallback: Arc<dyn FeedLoader>,
}

impl FeedLoaderWithFallback {
    pub fn new(primary: Arc<dyn FeedLoader>, fallback: Arc<dyn FeedLoader>) -> Self {
        Self { primary, fallback }
    }
}

impl FeedLoader for FeedLoaderWithFallback {
    fn load(&self, completion: LoadCompletion) {
        let fallback = Arc::clone(&self.fallback);
        self.primary.load(Box::new(move |result| match result {
            Ok(feed) => completion(Ok(feed)),
            Err(error) => {
                debug!("primary feed loader failed ({error}), trying fallback");
                fallback.load(completion);
            }
        }));
    }
}

/// Passes loads through, caching the feed whenever the load succeeds
pub struct FeedLoaderCacheDecorator {
    decoratee: Arc<dyn FeedLoader>,
    cache: Arc<dyn FeedCache>,
}

impl FeedLoaderCacheDecorator {
    pub fn new(decoratee: Arc<dyn FeedLoader>, cache: Arc<dyn FeedCache>) -> Self {
        Self { decoratee, cache }
    }
}

impl FeedLoader for FeedLoaderCacheDecorator {
    fn load(&self, completion: LoadCompletion) {
        let cache = Arc::clone(&self.cache);
        self.decoratee.load(Box::new(move |result| {
            if let Ok(feed) = &result {
                // Saving is best effort; the loaded feed is delivered either way.
                cache.save(
                    feed.clone(),
                    Box::new(|result| {
                        if let Err(error) = result {
                            debug!("caching loaded feed failed: {}", error);
                        }
                    }),
                );
            }
            completion(result);
        }));
    }
}
