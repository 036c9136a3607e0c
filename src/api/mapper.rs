//! Translation from the feed server's JSON payload into `FeedImage`s
//!
//! The server answers with `{"items": [...]}` where each item carries a UUID
//! `id`, an `image` URL and optional `description` and `location` strings.

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::feed::{FeedError, FeedImage};

/// The only status code accepted as a successful feed response
const OK_200: u16 = 200;

/// Top-level feed payload
#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

/// A single item as the server encodes it
#[derive(Debug, Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        FeedImage::new(item.id, item.description, item.location, item.image)
    }
}

pub struct FeedItemsMapper;

impl FeedItemsMapper {
    /// Maps a response to feed images, rejecting any status other than 200
    /// and any body that is not a well-formed feed payload.
    ///
    /// # Arguments
    /// * `body` - Raw response body, expected to be `{"items": [...]}`
    /// * `status` - HTTP status code of the response
    ///
    /// # Returns
    /// The images in payload order, or `FeedError::InvalidData`
    pub fn map(body: &[u8], status: u16) -> Result<Vec<FeedImage>, FeedError> {
        if status != OK_200 {
            return Err(FeedError::InvalidData);
        }

        let root: Root = serde_json::from_slice(body).map_err(|_| FeedError::InvalidData)?;
        Ok(root.items.into_iter().map(FeedImage::from).collect())
    }
}
