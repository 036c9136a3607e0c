//! HTTP transport capability and its reqwest implementation

use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use url::Url;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Errors that can occur before a response is received
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest client
    #[error("{0}")]
    Other(String),
}

pub type HttpClientResult = Result<HttpResponse, HttpClientError>;
pub type HttpCompletion = Box<dyn FnOnce(HttpClientResult) + Send>;

/// Fetches bytes from a URL.
///
/// The completion can be invoked on any thread. Any number of requests may be
/// outstanding at once.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &Url, completion: HttpCompletion);
}

/// `HttpClient` backed by a reqwest `Client`
///
/// Each request runs on its own tokio task, so `get` must be called from
/// within a tokio runtime.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new ReqwestHttpClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        let request = self.client.get(url.clone());
        tokio::spawn(async move {
            completion(fetch(request).await);
        });
    }
}

async fn fetch(request: RequestBuilder) -> HttpClientResult {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?.to_vec();
    Ok(HttpResponse { status, body })
}
