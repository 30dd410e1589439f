use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::fetcher::{FetchError, Fetcher};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::with_timeouts(
            Duration::from_millis(api.connect_timeout_ms),
            Duration::from_millis(api.read_timeout_ms),
        )
    }

    pub fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }
}

fn parse_url(url: &str) -> std::result::Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, other
        ))),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let url = parse_url(url)?;

        // The response owns the connection; every return below drops it.
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("{} answered with status {}", url, status);
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Read {} bytes from {}", body.len(), url);

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
