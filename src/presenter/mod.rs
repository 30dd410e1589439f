//! Turns articles into display rows.
//!
//! Rows are plain data; the TUI and the `headlines` command both render them.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::Article;

const SOURCE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_DATE_FORMAT: &str = "%m-%d-%Y";
pub const UNKNOWN_DATE: &str = "unknown date";

/// Image names handed to whatever draws the thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailAssets {
    /// Shown while a remote thumbnail loads
    pub placeholder: String,
    /// Shown when a remote thumbnail fails to load
    pub fallback: String,
    /// Shown when the article has no thumbnail at all
    pub default: String,
}

impl Default for ThumbnailAssets {
    fn default() -> Self {
        Self {
            placeholder: "placeholder".to_string(),
            fallback: "news-image".to_string(),
            default: "news-image".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Thumbnail {
    Remote {
        url: String,
        placeholder: String,
        fallback: String,
    },
    Default { image: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRow {
    pub section_label: String,
    pub title: String,
    /// `None` means the author line is hidden.
    pub author_label: Option<String>,
    pub date_label: String,
    pub thumbnail: Thumbnail,
    pub url: String,
}

/// Reformat a `yyyy-MM-ddTHH:mm:ssZ` timestamp as `MM-dd-yyyy`.
///
/// Returns `None` for anything that doesn't match that exact shape.
pub fn format_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw, SOURCE_DATE_FORMAT)
        .ok()
        .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
}

pub struct RowPresenter {
    assets: ThumbnailAssets,
}

impl Default for RowPresenter {
    fn default() -> Self {
        Self::new(ThumbnailAssets::default())
    }
}

impl RowPresenter {
    pub fn new(assets: ThumbnailAssets) -> Self {
        Self { assets }
    }

    pub fn present(&self, articles: &[Article]) -> Vec<ArticleRow> {
        articles.iter().map(|a| self.row(a)).collect()
    }

    pub fn row(&self, article: &Article) -> ArticleRow {
        let date = format_date(article.published_at());

        let thumbnail = match article.thumbnail_url() {
            Some(url) => Thumbnail::Remote {
                url: url.to_string(),
                placeholder: self.assets.placeholder.clone(),
                fallback: self.assets.fallback.clone(),
            },
            None => Thumbnail::Default {
                image: self.assets.default.clone(),
            },
        };

        ArticleRow {
            section_label: format!("Section : {}", article.section()),
            title: article.title().to_string(),
            author_label: article.author().map(|a| format!("Author : {}", a)),
            date_label: format!(
                "Published on : {}",
                date.as_deref().unwrap_or(UNKNOWN_DATE)
            ),
            thumbnail,
            url: article.url().to_string(),
        }
    }
}

/// Rows with the default thumbnail assets.
pub fn present(articles: &[Article]) -> Vec<ArticleRow> {
    RowPresenter::default().present(articles)
}
