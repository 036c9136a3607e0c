//! Cache module for keeping the last saved feed on disk
//!
//! `LocalFeedLoader` implements the cache use cases (load, save, validate) on
//! top of any `FeedStore`. `JsonFeedStore` is the production store: it keeps
//! a single feed-plus-timestamp record in a JSON file and runs every operation
//! on one worker task, in the order the operations were issued.

pub mod bytes;
pub mod json_store;
pub mod local;
pub mod policy;
mod store;

pub use bytes::{ByteStore, FileByteStore};
pub use json_store::JsonFeedStore;
pub use local::LocalFeedLoader;
pub use store::{
    CachedFeed, DeletionCompletion, DeletionResult, FeedStore, InsertionCompletion,
    InsertionResult, LocalFeedImage, RetrievalCompletion, RetrievalResult, StoreError,
};
