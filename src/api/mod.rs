//! Network path for the feed
//!
//! `RemoteFeedLoader` fetches the feed through an injected `HttpClient` and
//! maps the wire payload into `FeedImage` values. `ReqwestHttpClient` is the
//! production transport.

pub mod http;
pub mod mapper;
pub mod remote;

pub use http::{
    HttpClient, HttpClientError, HttpClientResult, HttpCompletion, HttpResponse, ReqwestHttpClient,
};
pub use mapper::FeedItemsMapper;
pub use remote::RemoteFeedLoader;
