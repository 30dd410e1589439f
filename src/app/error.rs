use thiserror::Error;

use crate::config::ConfigError;
use crate::extractor::ExtractError;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Payload error: {0}")]
    Payload(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not open {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NewsError>;
