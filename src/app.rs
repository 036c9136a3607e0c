//! Wiring of stores and loaders behind the feedcache commands

use std::sync::Arc;

use tokio::sync::oneshot;
use url::Url;

use crate::api::{HttpClient, ReqwestHttpClient, RemoteFeedLoader};
use crate::cache::{FeedStore, JsonFeedStore, LocalFeedLoader, StoreError};
use crate::config::FeedConfig;
use crate::feed::{
    load_feed, FeedError, FeedImage, FeedLoader, FeedLoaderCacheDecorator, FeedLoaderWithFallback,
};

/// Owns the cache store and the loaders built on it
pub struct App {
    store: Arc<JsonFeedStore>,
    local: Arc<LocalFeedLoader>,
    http_client: Arc<dyn HttpClient>,
}

impl App {
    /// Creates an App caching at `config.store_path` and fetching over reqwest.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &FeedConfig) -> Self {
        Self::with_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Creates an App with a custom HTTP client (for testing)
    pub fn with_client(config: &FeedConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let store = Arc::new(JsonFeedStore::new(config.store_path.clone()));
        let local = Arc::new(LocalFeedLoader::with_system_clock(store.clone()));
        Self {
            store,
            local,
            http_client,
        }
    }

    /// Loads the cached feed; an expired or missing cache is an empty feed
    pub async fn load(&self) -> Result<Vec<FeedImage>, FeedError> {
        load_or_closed(self.local.as_ref()).await
    }

    /// Fetches the feed from `url` and caches it, or loads the cached feed if
    /// the fetch fails. Waits for the cache write before returning.
    pub async fn refresh(&self, url: Url) -> Result<Vec<FeedImage>, FeedError> {
        let remote = Arc::new(RemoteFeedLoader::new(url, self.http_client.clone()));
        let caching_remote = Arc::new(FeedLoaderCacheDecorator::new(remote, self.local.clone()));
        let loader = FeedLoaderWithFallback::new(caching_remote, self.local.clone());

        let result = load_or_closed(&loader).await;
        self.store.until_idle().await;
        result
    }

    /// Evicts the cached feed if it is stale or unreadable
    pub async fn validate(&self) {
        self.local.validate_cache();
        self.store.until_idle().await;
    }

    /// Deletes the cached feed
    pub async fn clear(&self) -> Result<(), FeedError> {
        let (tx, rx) = oneshot::channel();
        self.store.delete_cached_feed(Box::new(move |result| {
            let _ = tx.send(result);
        }));
        rx.await.unwrap_or(Err(StoreError::Closed))?;
        Ok(())
    }
}

async fn load_or_closed<L: FeedLoader + ?Sized>(loader: &L) -> Result<Vec<FeedImage>, FeedError> {
    load_feed(loader)
        .await
        .unwrap_or(Err(FeedError::Store(StoreError::Closed)))
}
