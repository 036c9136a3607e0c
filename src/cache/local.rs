//! Cache use cases: load, save and validate the locally stored feed

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::policy;
use super::{CachedFeed, FeedStore, LocalFeedImage};
use crate::feed::{FeedCache, FeedError, FeedImage, FeedLoader, LoadCompletion, SaveCompletion};

/// Provides the current time on demand
pub type CurrentDate = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

struct Shared {
    store: Arc<dyn FeedStore>,
    current_date: CurrentDate,
}

impl Shared {
    fn is_valid(&self, timestamp: DateTime<Utc>) -> bool {
        policy::validate(timestamp, (self.current_date)())
    }

    fn cache(self: &Arc<Self>, feed: Vec<FeedImage>, completion: SaveCompletion) {
        let alive = Arc::downgrade(self);
        let local: Vec<LocalFeedImage> = feed.into_iter().map(LocalFeedImage::from).collect();
        self.store.insert(
            local,
            (self.current_date)(),
            Box::new(move |result| {
                if alive.upgrade().is_none() {
                    return;
                }
                completion(result.map_err(FeedError::from));
            }),
        );
    }

    fn evict(&self) {
        self.store.delete_cached_feed(Box::new(|result| {
            if let Err(error) = result {
                debug!("evicting feed cache failed: {}", error);
            }
        }));
    }
}

/// Feed loader and cache backed by a `FeedStore`
///
/// Loading never mutates the store; only `validate_cache` evicts stale data.
/// Once the loader is dropped, completions of store operations still in
/// flight are discarded instead of being delivered.
pub struct LocalFeedLoader {
    shared: Arc<Shared>,
}

impl LocalFeedLoader {
    /// Creates a loader over `store` that asks `current_date` for the time
    /// whenever it needs it.
    ///
    /// # Arguments
    /// * `store` - The store holding the cached feed
    /// * `current_date` - Clock read on every save and every freshness check
    ///
    /// # Returns
    /// A loader that does not touch the store until one of its operations runs
    pub fn new<F>(store: Arc<dyn FeedStore>, current_date: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                store,
                current_date: Arc::new(current_date),
            }),
        }
    }

    /// Creates a loader that reads the system clock
    pub fn with_system_clock(store: Arc<dyn FeedStore>) -> Self {
        Self::new(store, Utc::now)
    }

    /// Deletes the cached feed if it cannot be read or is no longer valid.
    ///
    /// The outcome of the deletion is not reported; the next load simply sees
    /// whatever the store holds then.
    pub fn validate_cache(&self) {
        let alive = Arc::downgrade(&self.shared);
        self.shared.store.retrieve(Box::new(move |result| {
            let Some(shared) = alive.upgrade() else {
                return;
            };

            match result {
                Err(error) => {
                    warn!("feed cache unreadable ({}), deleting it", error);
                    shared.evict();
                }
                Ok(CachedFeed::Found { timestamp, .. }) if !shared.is_valid(timestamp) => {
                    warn!("feed cache saved at {} has expired, deleting it", timestamp);
                    shared.evict();
                }
                Ok(CachedFeed::Empty) | Ok(CachedFeed::Found { .. }) => {}
            }
        }));
    }
}

impl FeedLoader for LocalFeedLoader {
    fn load(&self, completion: LoadCompletion) {
        let alive = Arc::downgrade(&self.shared);
        self.shared.store.retrieve(Box::new(move |result| {
            let Some(shared) = alive.upgrade() else {
                return;
            };

            match result {
                Err(error) => completion(Err(FeedError::Store(error))),
                Ok(CachedFeed::Found { feed, timestamp }) if shared.is_valid(timestamp) => {
                    completion(Ok(feed.into_iter().map(FeedImage::from).collect()))
                }
                Ok(CachedFeed::Found { .. }) | Ok(CachedFeed::Empty) => completion(Ok(Vec::new())),
            }
        }));
    }
}

impl FeedCache for LocalFeedLoader {
    /// Deletes the current cache, then inserts `feed` stamped with the
    /// current time. A failed deletion is reported without inserting.
    fn save(&self, feed: Vec<FeedImage>, completion: SaveCompletion) {
        let alive = Arc::downgrade(&self.shared);
        self.shared.store.delete_cached_feed(Box::new(move |result| {
            let Some(shared) = alive.upgrade() else {
                return;
            };

            match result {
                Err(error) => completion(Err(FeedError::Store(error))),
                Ok(()) => shared.cache(feed, completion),
            }
        }));
    }
}
