//! Shared fixtures and test doubles for the integration tests

#![allow(dead_code)]

use std::io;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use feedcache::api::{HttpClient, HttpClientError, HttpCompletion, HttpResponse};
use feedcache::cache::{
    CachedFeed, DeletionCompletion, FeedStore, InsertionCompletion, LocalFeedImage,
    RetrievalCompletion, RetrievalResult, StoreError,
};
use feedcache::feed::FeedImage;
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

pub fn any_url() -> Url {
    Url::parse("https://any-url.com/feed").unwrap()
}

pub fn any_store_error() -> StoreError {
    StoreError::Io(io::Error::new(io::ErrorKind::Other, "any error"))
}

pub fn unique_image() -> FeedImage {
    FeedImage::new(
        Uuid::new_v4(),
        Some("any".to_string()),
        Some("any".to_string()),
        Url::parse(&format!("https://images.any-url.com/{}.png", Uuid::new_v4())).unwrap(),
    )
}

/// Two unique images in both their domain and local shape
pub fn unique_image_feed() -> (Vec<FeedImage>, Vec<LocalFeedImage>) {
    let models = vec![unique_image(), unique_image()];
    let local = models.iter().cloned().map(LocalFeedImage::from).collect();
    (models, local)
}

/// A fixed point in time so tests do not depend on the clock
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

/// Retrieves through any store and waits for the completion
pub async fn retrieve(store: &dyn FeedStore) -> RetrievalResult {
    let (tx, rx) = oneshot::channel();
    store.retrieve(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    rx.await.expect("retrieval should complete")
}

pub async fn insert(
    store: &dyn FeedStore,
    feed: Vec<LocalFeedImage>,
    timestamp: DateTime<Utc>,
) -> Result<(), StoreError> {
    let (tx, rx) = oneshot::channel();
    store.insert(
        feed,
        timestamp,
        Box::new(move |result| {
            let _ = tx.send(result);
        }),
    );
    rx.await.expect("insertion should complete")
}

pub async fn delete(store: &dyn FeedStore) -> Result<(), StoreError> {
    let (tx, rx) = oneshot::channel();
    store.delete_cached_feed(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    rx.await.expect("deletion should complete")
}

/// Messages a `FeedStoreSpy` has received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedImage>, DateTime<Utc>),
    Retrieve,
}

#[derive(Default)]
struct StoreSpyState {
    messages: Vec<ReceivedMessage>,
    deletions: Vec<Option<DeletionCompletion>>,
    insertions: Vec<Option<InsertionCompletion>>,
    retrievals: Vec<Option<RetrievalCompletion>>,
}

/// `FeedStore` that records calls and completes them only when told to
#[derive(Default)]
pub struct FeedStoreSpy {
    state: Mutex<StoreSpyState>,
}

fn take<T>(slots: &mut [Option<T>], index: usize) -> T {
    slots
        .get_mut(index)
        .and_then(Option::take)
        .unwrap_or_else(|| panic!("no pending completion at index {}", index))
}

impl FeedStoreSpy {
    pub fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    pub fn complete_deletion(&self, error: StoreError, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().deletions, index);
        completion(Err(error));
    }

    pub fn complete_deletion_successfully(&self, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().deletions, index);
        completion(Ok(()));
    }

    pub fn complete_insertion(&self, error: StoreError, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().insertions, index);
        completion(Err(error));
    }

    pub fn complete_insertion_successfully(&self, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().insertions, index);
        completion(Ok(()));
    }

    pub fn complete_retrieval(&self, error: StoreError, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().retrievals, index);
        completion(Err(error));
    }

    pub fn complete_retrieval_with_empty_cache(&self, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().retrievals, index);
        completion(Ok(CachedFeed::Empty));
    }

    pub fn complete_retrieval_with(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        index: usize,
    ) {
        let completion = take(&mut self.state.lock().unwrap().retrievals, index);
        completion(Ok(CachedFeed::Found { feed, timestamp }));
    }
}

impl FeedStore for FeedStoreSpy {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::DeleteCachedFeed);
        state.deletions.push(Some(completion));
    }

    fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
        completion: InsertionCompletion,
    ) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::Insert(feed, timestamp));
        state.insertions.push(Some(completion));
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::Retrieve);
        state.retrievals.push(Some(completion));
    }
}

#[derive(Default)]
struct HttpSpyState {
    urls: Vec<Url>,
    completions: Vec<Option<HttpCompletion>>,
}

/// `HttpClient` that records requested URLs and completes on demand
#[derive(Default)]
pub struct HttpClientSpy {
    state: Mutex<HttpSpyState>,
}

impl HttpClientSpy {
    pub fn requested_urls(&self) -> Vec<Url> {
        self.state.lock().unwrap().urls.clone()
    }

    pub fn complete_with_error(&self, index: usize) {
        let completion = take(&mut self.state.lock().unwrap().completions, index);
        completion(Err(HttpClientError::Other("connection refused".to_string())));
    }

    pub fn complete_with_status(&self, status: u16, body: &[u8], index: usize) {
        let completion = take(&mut self.state.lock().unwrap().completions, index);
        completion(Ok(HttpResponse {
            status,
            body: body.to_vec(),
        }));
    }
}

impl HttpClient for HttpClientSpy {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        let mut state = self.state.lock().unwrap();
        state.urls.push(url.clone());
        state.completions.push(Some(completion));
    }
}

/// Encodes images the way the feed server does
pub fn make_items_json(images: &[FeedImage]) -> Vec<u8> {
    let items: Vec<serde_json::Value> = images
        .iter()
        .map(|image| {
            let mut item = serde_json::json!({
                "id": image.id.to_string(),
                "image": image.url.to_string(),
            });
            if let Some(description) = &image.description {
                item["description"] = serde_json::Value::from(description.clone());
            }
            if let Some(location) = &image.location {
                item["location"] = serde_json::Value::from(location.clone());
            }
            item
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({ "items": items })).unwrap()
}
