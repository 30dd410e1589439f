//! Fetch and extract composed into one call: search url in, articles out.

use std::sync::Arc;

use tracing::{error, info};
use url::Url;

use crate::app::Result;
use crate::config::{ApiConfig, Preferences};
use crate::domain::Article;
use crate::extractor::{self, Extraction};
use crate::fetcher::{FetchError, Fetcher};

/// Results requested per search; there is no paging beyond this.
pub const PAGE_SIZE: u32 = 50;
pub const SHOW_FIELDS: &str = "thumbnail,byline";

/// Builds the search request url from the api settings and user preferences.
pub struct SearchQuery<'a> {
    api: &'a ApiConfig,
    prefs: &'a Preferences,
}

impl<'a> SearchQuery<'a> {
    pub fn new(api: &'a ApiConfig, prefs: &'a Preferences) -> Self {
        Self { api, prefs }
    }

    pub fn url(&self) -> std::result::Result<Url, FetchError> {
        let base = self.api.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/search", base))
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))?;

        url.query_pairs_mut()
            .append_pair("page-size", &PAGE_SIZE.to_string())
            .append_pair("show-fields", SHOW_FIELDS)
            .append_pair("section", &self.prefs.section)
            .append_pair("order-by", self.prefs.order_by.as_str())
            .append_pair("api-key", &self.api.api_key);

        Ok(url)
    }
}

#[derive(Clone)]
pub struct QueryPipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl QueryPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and extract its articles.
    ///
    /// Fetch and payload failures come back as distinct errors, so an empty
    /// `Ok` always means the service had nothing to return.
    pub async fn run(&self, url: &str) -> Result<Extraction> {
        let body = self.fetcher.fetch(url).await?;
        let extraction = extractor::extract(Some(&body))?;

        info!(
            "Extracted {} articles ({} rejected)",
            extraction.articles.len(),
            extraction.rejected.len()
        );

        Ok(extraction)
    }

    /// Like [`run`](Self::run), but any failure is logged and becomes an
    /// empty list.
    pub async fn articles_or_empty(&self, url: &str) -> Vec<Article> {
        match self.run(url).await {
            Ok(extraction) => extraction.articles,
            Err(e) => {
                error!("Query for {} failed: {}", url, e);
                Vec::new()
            }
        }
    }
}
