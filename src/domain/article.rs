use serde::Serialize;

/// Name of a required field that was missing or empty at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

/// One news article as returned by the search endpoint.
///
/// Fields are private so an `Article` can only be built through
/// [`Article::new`], which rejects an empty section, title or url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    section: String,
    title: String,
    author: Option<String>,
    published_at: String,
    url: String,
    thumbnail_url: Option<String>,
}

impl Article {
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
        published_at: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, MissingField> {
        let section = section.into();
        let title = title.into();
        let url = url.into();

        if section.trim().is_empty() {
            return Err(MissingField("sectionName"));
        }
        if title.trim().is_empty() {
            return Err(MissingField("webTitle"));
        }
        if url.trim().is_empty() {
            return Err(MissingField("webUrl"));
        }

        Ok(Self {
            section,
            title,
            author: None,
            published_at: published_at.into(),
            url,
            thumbnail_url: None,
        })
    }

    /// Attach a byline. Blank values keep the author absent.
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = non_blank(author);
        self
    }

    /// Attach a thumbnail url. Blank values keep the thumbnail absent.
    pub fn with_thumbnail(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = non_blank(thumbnail_url);
        self
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "Politics",
            "Budget vote delayed",
            "2021-05-03T10:15:00Z",
            "https://www.theguardian.com/politics/1",
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_required_fields() {
        assert_eq!(
            Article::new("", "t", "d", "u").unwrap_err(),
            MissingField("sectionName")
        );
        assert_eq!(
            Article::new("s", "  ", "d", "u").unwrap_err(),
            MissingField("webTitle")
        );
        assert_eq!(
            Article::new("s", "t", "d", "").unwrap_err(),
            MissingField("webUrl")
        );
    }

    #[test]
    fn test_optional_fields_default_to_absent() {
        let article = sample();
        assert_eq!(article.author(), None);
        assert_eq!(article.thumbnail_url(), None);
    }

    #[test]
    fn test_blank_optional_fields_stay_absent() {
        let article = sample()
            .with_author(Some(String::new()))
            .with_thumbnail(Some("   ".into()));
        assert_eq!(article.author(), None);
        assert_eq!(article.thumbnail_url(), None);
    }

    #[test]
    fn test_optional_fields_are_kept() {
        let article = sample()
            .with_author(Some("Jane Doe".into()))
            .with_thumbnail(Some("https://media.example/t.jpg".into()));
        assert_eq!(article.author(), Some("Jane Doe"));
        assert_eq!(article.thumbnail_url(), Some("https://media.example/t.jpg"));
    }

    #[test]
    fn test_published_at_may_be_unparseable() {
        let article = Article::new("s", "t", "yesterday", "u").unwrap();
        assert_eq!(article.published_at(), "yesterday");
    }
}
