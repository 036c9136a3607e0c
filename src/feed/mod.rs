//! Feed feature types shared by the network and cache paths
//!
//! Defines the `FeedImage` domain value, the `FeedLoader` and `FeedCache`
//! capabilities both paths implement, and the error taxonomy they report.
//! Every operation reports through a completion closure that may run on any
//! thread; callers needing a particular context must redispatch themselves.

pub mod composite;

pub use composite::{FeedLoaderCacheDecorator, FeedLoaderWithFallback};

use thiserror::Error;
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

use crate::cache::StoreError;

/// A single image in the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedImage {
    /// Unique identifier of the image
    pub id: Uuid,
    /// Optional human-readable description
    pub description: Option<String>,
    /// Optional location label
    pub location: Option<String>,
    /// Where the image itself can be fetched from
    pub url: Url,
}

impl FeedImage {
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}

/// Errors reported by feed loaders and caches
///
/// An expired cache is not an error: it loads as an empty feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed server could not be reached
    #[error("Could not reach the feed server")]
    Connectivity,

    /// The feed server answered with an unexpected status or payload
    #[error("Feed server returned invalid data")]
    InvalidData,

    /// The local cache could not be read or written
    #[error("Feed cache failure: {0}")]
    Store(#[from] StoreError),
}

pub type LoadResult = Result<Vec<FeedImage>, FeedError>;
pub type LoadCompletion = Box<dyn FnOnce(LoadResult) + Send>;

pub type SaveResult = Result<(), FeedError>;
pub type SaveCompletion = Box<dyn FnOnce(SaveResult) + Send>;

/// Something that can produce the current feed
pub trait FeedLoader: Send + Sync {
    fn load(&self, completion: LoadCompletion);
}

/// Something that can persist a feed for later loads
pub trait FeedCache: Send + Sync {
    fn save(&self, feed: Vec<FeedImage>, completion: SaveCompletion);
}

/// Runs `loader` and waits for its completion.
///
/// Returns `None` if the completion was dropped without being called, which
/// happens when the loader is destroyed while the load is outstanding.
pub async fn load_feed<L: FeedLoader + ?Sized>(loader: &L) -> Option<LoadResult> {
    let (tx, rx) = oneshot::channel();
    loader.load(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    rx.await.ok()
}

/// Runs `cache.save` and waits for its completion.
pub async fn save_feed<C: FeedCache + ?Sized>(cache: &C, feed: Vec<FeedImage>) -> Option<SaveResult> {
    let (tx, rx) = oneshot::channel();
    cache.save(
        feed,
        Box::new(move |result| {
            let _ = tx.send(result);
        }),
    );
    rx.await.ok()
}
