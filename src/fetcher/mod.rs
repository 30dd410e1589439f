pub mod http_fetcher;

use async_trait::async_trait;
use thiserror::Error;

pub use http_fetcher::HttpFetcher;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Rejected before any connection was attempted
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// DNS, connect, reset, timeout or body read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Anything other than HTTP 200; the body is not read
    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),
}

#[async_trait]
pub trait Fetcher {
    /// Issue a single GET and return the full body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
