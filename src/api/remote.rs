//! Loads the feed from the feed server

use std::sync::Arc;

use log::debug;
use url::Url;

use super::{FeedItemsMapper, HttpClient};
use crate::feed::{FeedError, FeedLoader, LoadCompletion};

struct Shared {
    url: Url,
    client: Arc<dyn HttpClient>,
}

/// `FeedLoader` that GETs a configured URL and maps the response
///
/// Completions of requests still in flight when the loader is dropped are
/// discarded.
pub struct RemoteFeedLoader {
    shared: Arc<Shared>,
}

impl RemoteFeedLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self {
            shared: Arc::new(Shared { url, client }),
        }
    }
}

impl FeedLoader for RemoteFeedLoader {
    fn load(&self, completion: LoadCompletion) {
        let alive = Arc::downgrade(&self.shared);
        self.shared.client.get(
            &self.shared.url,
            Box::new(move |result| {
                let Some(shared) = alive.upgrade() else {
                    return;
                };

                let mapped = match result {
                    Ok(response) => {
                        debug!("feed server {} answered {}", shared.url, response.status);
                        FeedItemsMapper::map(&response.body, response.status)
                    }
                    Err(error) => {
                        debug!("feed server {} unreachable: {}", shared.url, error);
                        Err(FeedError::Connectivity)
                    }
                };
                completion(mapped);
            }),
        );
    }
}
