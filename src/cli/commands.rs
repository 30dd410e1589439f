use crate::app::{AppContext, NewsError, Result};
use crate::cli::SectionChoice;
use crate::config::Preferences;
use crate::controller::{EmptyReason, LoadStart, ScreenState};
use crate::presenter::{ArticleRow, Thumbnail};

/// Apply the overrides in `choice` on top of `prefs`.
pub fn apply_choice(mut prefs: Preferences, choice: &SectionChoice) -> Preferences {
    let section = choice.section.as_deref().map(str::trim);
    if let Some(section) = section.filter(|s| !s.is_empty()) {
        prefs.section = section.to_string();
    }
    if let Some(order_by) = choice.order_by {
        prefs.order_by = order_by;
    }
    prefs
}

/// Fetch one screen of headlines and print it.
pub async fn headlines(ctx: &AppContext, choice: &SectionChoice, json: bool) -> Result<()> {
    let prefs = apply_choice(ctx.load_preferences()?, choice);
    let mut screen = ctx.screen();

    if screen.open(&prefs).await == LoadStart::Started {
        screen.wait().await;
    }

    // Offline and failed loads must not look like an empty result
    let failed = matches!(
        screen.state(),
        ScreenState::Offline | ScreenState::Empty(EmptyReason::Unreachable(_))
    );
    if failed {
        let message = screen.state().placeholder().unwrap_or_default();
        return Err(NewsError::Unavailable(message));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(screen.rows())?);
        return Ok(());
    }

    match screen.state() {
        ScreenState::Ready(rows) => {
            for (i, row) in rows.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", format_row(row));
            }
            if screen.rejected() > 0 {
                eprintln!("\n{} results skipped (missing fields)", screen.rejected());
            }
        }
        state => {
            if let Some(message) = state.placeholder() {
                println!("{}", message);
            }
        }
    }

    Ok(())
}

/// Show the saved preferences, or update them when `choice` has values.
pub fn settings(ctx: &AppContext, choice: &SectionChoice) -> Result<()> {
    let current = ctx.load_preferences()?;

    if choice.is_empty() {
        println!("section  = {}", current.section);
        println!("order-by = {}", current.order_by);
        return Ok(());
    }

    let updated = apply_choice(current, choice);
    ctx.save_preferences(&updated)?;
    println!(
        "Saved: section = {}, order-by = {}",
        updated.section, updated.order_by
    );

    Ok(())
}

/// Plain-text rendering of one row.
pub fn format_row(row: &ArticleRow) -> String {
    let mut lines = vec![row.section_label.clone(), row.title.clone()];
    if let Some(author) = &row.author_label {
        lines.push(author.clone());
    }
    lines.push(row.date_label.clone());
    match &row.thumbnail {
        Thumbnail::Remote { url, .. } => lines.push(format!("Image : {}", url)),
        Thumbnail::Default { image } => lines.push(format!("Image : [{}]", image)),
    }
    lines.push(row.url.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::{Config, OrderBy};
    use crate::controller::Connectivity;
    use crate::domain::Article;
    use crate::fetcher::{FetchError, Fetcher};
    use crate::presenter::present;

    struct StubFetcher(std::result::Result<&'static str, u16>);

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, FetchError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(code) => Err(FetchError::BadStatus(code)),
            }
        }
    }

    struct FixedConnectivity(bool);

    #[async_trait]
    impl Connectivity for FixedConnectivity {
        async fn is_online(&self) -> bool {
            self.0
        }
    }

    fn context(
        response: std::result::Result<&'static str, u16>,
        online: bool,
        dir: &tempfile::TempDir,
    ) -> AppContext {
        AppContext::with_parts(
            Config::default(),
            Arc::new(StubFetcher(response)),
            Arc::new(FixedConnectivity(online)),
            dir.path().join("preferences.toml"),
        )
    }

    #[tokio::test]
    async fn test_headlines_fails_on_bad_status() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(Err(503), true, &dir);

        for json in [true, false] {
            let err = headlines(&ctx, &SectionChoice::default(), json)
                .await
                .unwrap_err();
            assert!(matches!(err, NewsError::Unavailable(_)));
            assert!(err.to_string().starts_with("Couldn't load news:"));
        }
    }

    #[tokio::test]
    async fn test_headlines_fails_when_offline() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(Ok(r#"{"response":{"results":[]}}"#), false, &dir);

        let err = headlines(&ctx, &SectionChoice::default(), true)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No internet connection.");
    }

    #[tokio::test]
    async fn test_headlines_no_results_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(Ok(r#"{"response":{"results":[]}}"#), true, &dir);

        assert!(headlines(&ctx, &SectionChoice::default(), true).await.is_ok());
        assert!(headlines(&ctx, &SectionChoice::default(), false).await.is_ok());
    }

    #[test]
    fn test_apply_choice_ignores_blank_section() {
        let prefs = Preferences::default();

        for blank in ["", "   "] {
            let kept = apply_choice(
                prefs.clone(),
                &SectionChoice {
                    section: Some(blank.into()),
                    order_by: None,
                },
            );
            assert_eq!(kept.section, "politics");
        }
    }

    #[test]
    fn test_apply_choice_overrides_only_given_values() {
        let prefs = Preferences::default();

        let same = apply_choice(prefs.clone(), &SectionChoice::default());
        assert_eq!(same, prefs);

        let changed = apply_choice(
            prefs,
            &SectionChoice {
                section: Some(" science ".into()),
                order_by: Some(OrderBy::Oldest),
            },
        );
        assert_eq!(changed.section, "science");
        assert_eq!(changed.order_by, OrderBy::Oldest);
    }

    #[test]
    fn test_format_row_hides_missing_author() {
        let article = Article::new(
            "Sport",
            "Late winner",
            "2021-05-02T08:00:00Z",
            "https://example.com/winner",
        )
        .unwrap();
        let rows = present(&[article]);

        assert_eq!(
            format_row(&rows[0]),
            "Section : Sport\nLate winner\nPublished on : 05-02-2021\nImage : [news-image]\nhttps://example.com/winner"
        );
    }

    #[test]
    fn test_format_row_with_author_and_thumbnail() {
        let article = Article::new("World news", "Summit", "bad", "https://example.com/s")
            .unwrap()
            .with_author(Some("Jane Doe".into()))
            .with_thumbnail(Some("https://media.example/s.jpg".into()));
        let rows = present(&[article]);

        let text = format_row(&rows[0]);
        assert!(text.contains("\nAuthor : Jane Doe\n"));
        assert!(text.contains("Published on : unknown date"));
        assert!(text.contains("Image : https://media.example/s.jpg"));
    }
}
