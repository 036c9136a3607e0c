//! The `FeedStore` capability and the records it holds

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::feed::FeedImage;

/// A feed image as it is persisted by the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<FeedImage> for LocalFeedImage {
    fn from(image: FeedImage) -> Self {
        Self {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(image: LocalFeedImage) -> Self {
        FeedImage::new(image.id, image.description, image.location, image.url)
    }
}

/// Content of a store: nothing, or exactly one feed with its save time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedFeed {
    Empty,
    Found {
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    },
}

/// Errors that can occur while reading or writing a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the backing file failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file does not hold a valid cache record
    #[error("Cache data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The store can no longer run operations
    #[error("Cache store is closed")]
    Closed,
}

pub type RetrievalResult = Result<CachedFeed, StoreError>;
pub type InsertionResult = Result<(), StoreError>;
pub type DeletionResult = Result<(), StoreError>;

pub type RetrievalCompletion = Box<dyn FnOnce(RetrievalResult) + Send>;
pub type InsertionCompletion = Box<dyn FnOnce(InsertionResult) + Send>;
pub type DeletionCompletion = Box<dyn FnOnce(DeletionResult) + Send>;

/// Durable storage for at most one cached feed.
///
/// Completions can be invoked on any thread; callers are responsible for
/// dispatching to another context if they need one. Implementations must run
/// operations one at a time, in the order they were issued.
pub trait FeedStore: Send + Sync {
    /// Removes the cached feed. Deleting an empty store succeeds.
    fn delete_cached_feed(&self, completion: DeletionCompletion);

    /// Replaces whatever is cached with `feed` saved at `timestamp`.
    fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        completion: InsertionCompletion,
    );

    /// Reads the cached feed without side effects.
    fn retrieve(&self, completion: RetrievalCompletion);
}
