//! File-backed `FeedStore`
//!
//! The cached feed is kept as one pretty-printed JSON document:
//!
//! ```json
//! { "feed": [{ "id": "...", "description": null, "location": null, "url": "..." }],
//!   "timestamp": "2024-03-10T08:30:00Z" }
//! ```
//!
//! All operations are queued to a single worker task and run strictly in the
//! order they were issued, with their completions invoked on that task.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::bytes::{ByteStore, FileByteStore};
use super::store::{
    CachedFeed, DeletionCompletion, DeletionResult, FeedStore, InsertionCompletion,
    InsertionResult, LocalFeedImage, RetrievalCompletion, RetrievalResult, StoreError,
};

/// On-disk cache record
#[derive(Debug, Serialize, Deserialize)]
struct Cache {
    feed: Vec<LocalFeedImage>,
    timestamp: DateTime<Utc>,
}

/// Work queued for the store's worker task
enum Command {
    Retrieve(RetrievalCompletion),
    Insert {
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        completion: InsertionCompletion,
    },
    Delete(DeletionCompletion),
    Idle(oneshot::Sender<()>),
}

impl Command {
    /// Completes the command without running it
    fn reject(self) {
        match self {
            Command::Retrieve(completion) => completion(Err(StoreError::Closed)),
            Command::Insert { completion, .. } => completion(Err(StoreError::Closed)),
            Command::Delete(completion) => completion(Err(StoreError::Closed)),
            Command::Idle(_) => {}
        }
    }
}

/// `FeedStore` persisting the feed as JSON through a `ByteStore`
///
/// Must be created from within a tokio runtime. Dropping the store lets the
/// worker finish the operations already queued, then stop.
#[derive(Debug, Clone)]
pub struct JsonFeedStore {
    sender: mpsc::UnboundedSender<Command>,
}

impl JsonFeedStore {
    /// Creates a store keeping its record in the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_bytes(FileByteStore::new(path))
    }

    /// Creates a store over any byte store
    ///
    /// Spawns the worker task, so it must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// * `bytes` - Where the encoded cache record is read from and written to
    ///
    /// # Returns
    /// A store whose operations run one at a time in submission order
    pub fn with_bytes<B: ByteStore>(bytes: B) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(Arc::new(bytes), receiver));
        Self { sender }
    }

    /// Resolves once the worker has no queued operations left, including
    /// operations queued by completions while it was draining.
    pub async fn until_idle(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(Command::Idle(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    fn submit(&self, command: Command) {
        if let Err(mpsc::error::SendError(command)) = self.sender.send(command) {
            warn!("feed store worker has stopped, rejecting operation");
            command.reject();
        }
    }
}

impl FeedStore for JsonFeedStore {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        self.submit(Command::Delete(completion));
    }

    fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        completion: InsertionCompletion,
    ) {
        self.submit(Command::Insert {
            feed,
            timestamp,
            completion,
        });
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        self.submit(Command::Retrieve(completion));
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Retrieve(_) => f.write_str("Retrieve"),
            Command::Insert { feed, timestamp, .. } => f
                .debug_struct("Insert")
                .field("items", &feed.len())
                .field("timestamp", timestamp)
                .finish(),
            Command::Delete(_) => f.write_str("Delete"),
            Command::Idle(_) => f.write_str("Idle"),
        }
    }
}

async fn run_worker<B: ByteStore>(bytes: Arc<B>, mut receiver: mpsc::UnboundedReceiver<Command>) {
    let mut idle_waiters: Vec<oneshot::Sender<()>> = Vec::new();

    while let Some(command) = receiver.recv().await {
        debug!("feed store running {:?}", command);
        match command {
            Command::Retrieve(completion) => {
                let result = run_blocking(&bytes, retrieve::<B>).await;
                completion(result);
            }
            Command::Insert {
                feed,
                timestamp,
                completion,
            } => {
                let result = run_blocking(&bytes, move |bytes| insert(bytes, feed, timestamp)).await;
                completion(result);
            }
            Command::Delete(completion) => {
                let result = run_blocking(&bytes, delete::<B>).await;
                completion(result);
            }
            Command::Idle(waiter) => idle_waiters.push(waiter),
        }

        if receiver.is_empty() {
            for waiter in idle_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }
}

/// Runs a file operation on the blocking pool and waits for it
async fn run_blocking<B, T, F>(bytes: &Arc<B>, operation: F) -> Result<T, StoreError>
where
    B: ByteStore,
    T: Send + 'static,
    F: FnOnce(&B) -> Result<T, StoreError> + Send + 'static,
{
    let bytes = Arc::clone(bytes);
    match tokio::task::spawn_blocking(move || operation(&*bytes)).await {
        Ok(result) => result,
        Err(join_error) => Err(StoreError::Io(io::Error::other(join_error))),
    }
}

fn retrieve<B: ByteStore>(bytes: &B) -> RetrievalResult {
    let Some(data) = bytes.read()? else {
        return Ok(CachedFeed::Empty);
    };

    let cache: Cache = serde_json::from_slice(&data)?;
    Ok(CachedFeed::Found {
        feed: cache.feed,
        timestamp: cache.timestamp,
    })
}

fn insert<B: ByteStore>(
    bytes: &B,
    feed: Vec<LocalFeedImage>,
    timestamp: DateTime<Utc>,
) -> InsertionResult {
    let json = serde_json::to_vec_pretty(&Cache { feed, timestamp })?;
    bytes.write(&json)?;
    Ok(())
}

fn delete<B: ByteStore>(bytes: &B) -> DeletionResult {
    bytes.remove()?;
    Ok(())
}
