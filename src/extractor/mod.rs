//! Converts a search response body into [`Article`]s.
//!
//! Malformed result elements are skipped and reported in
//! [`Extraction::rejected`]; a body without `response.results` fails as a whole.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::domain::Article;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("result {index} is missing required field `{field}`")]
    MissingRequiredField { index: usize, field: &'static str },
}

/// Articles parsed from one payload, plus the elements that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub articles: Vec<Article>,
    pub rejected: Vec<ExtractError>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[derive(Deserialize)]
struct Envelope {
    response: SearchResponse,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    section_name: Option<String>,
    web_publication_date: Option<String>,
    web_title: Option<String>,
    web_url: Option<String>,
    #[serde(default)]
    fields: Option<WireFields>,
}

#[derive(Deserialize, Default)]
struct WireFields {
    byline: Option<String>,
    thumbnail: Option<String>,
}

/// Parse a raw search response.
///
/// `None` and blank input yield an empty extraction rather than an error.
pub fn extract(raw: Option<&str>) -> Result<Extraction, ExtractError> {
    let raw = match raw {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Ok(Extraction::default()),
    };

    let envelope: Envelope = serde_json::from_str(raw)
        .map_err(|e| ExtractError::MalformedPayload(e.to_string()))?;

    let mut extraction = Extraction::default();

    for (index, value) in envelope.response.results.into_iter().enumerate() {
        match article_from_value(index, value) {
            Ok(article) => extraction.articles.push(article),
            Err(e) => {
                warn!("Skipping search result: {}", e);
                extraction.rejected.push(e);
            }
        }
    }

    Ok(extraction)
}

fn article_from_value(index: usize, value: Value) -> Result<Article, ExtractError> {
    if !value.is_object() {
        return Err(ExtractError::MalformedPayload(format!(
            "result {} is not an object",
            index
        )));
    }

    let wire: WireResult = serde_json::from_value(value)
        .map_err(|e| ExtractError::MalformedPayload(format!("result {}: {}", index, e)))?;

    let missing = |field| ExtractError::MissingRequiredField { index, field };

    let section = wire.section_name.ok_or_else(|| missing("sectionName"))?;
    let published_at = wire
        .web_publication_date
        .ok_or_else(|| missing("webPublicationDate"))?;
    let title = wire.web_title.ok_or_else(|| missing("webTitle"))?;
    let url = wire.web_url.ok_or_else(|| missing("webUrl"))?;
    let fields = wire.fields.unwrap_or_default();

    let article = Article::new(section, title, published_at, url)
        .map_err(|field| missing(field.0))?
        .with_author(fields.byline)
        .with_thumbnail(fields.thumbnail);

    Ok(article)
}
