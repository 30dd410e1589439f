//! Drives one news screen: connectivity check, a single background fetch,
//! and the state the UI renders.
//!
//! ```text
//! open() ─ offline ──────────────▶ Offline
//!        └ spawn pipeline ──▶ Loading ── poll()/wait() ──▶ Ready | Empty
//! close() ────────────────────────▶ Closed (late results are dropped)
//! ```

mod connectivity;
mod navigator;

pub use connectivity::{Connectivity, DnsConnectivity, DEFAULT_PROBE_TIMEOUT};
pub use navigator::{BrowserNavigator, Navigator};

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::app::{NewsError, Result};
use crate::config::{ApiConfig, Preferences};
use crate::extractor::Extraction;
use crate::presenter::{ArticleRow, RowPresenter};
use crate::query::{QueryPipeline, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    NoResults,
    Unreachable(String),
}

impl EmptyReason {
    pub fn message(&self) -> String {
        match self {
            EmptyReason::NoResults => "No news found.".to_string(),
            EmptyReason::Unreachable(reason) => format!("Couldn't load news: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Offline,
    Ready(Vec<ArticleRow>),
    Empty(EmptyReason),
    Closed,
}

impl ScreenState {
    /// Text for the empty-state placeholder, if the list is showing one.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            ScreenState::Idle | ScreenState::Ready(_) | ScreenState::Closed => None,
            ScreenState::Loading => Some("Loading news...".to_string()),
            ScreenState::Offline => Some(OFFLINE_MESSAGE.to_string()),
            ScreenState::Empty(reason) => Some(reason.message()),
        }
    }
}

pub const OFFLINE_MESSAGE: &str = "No internet connection.";

/// Outcome of [`ScreenController::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStart {
    Started,
    AlreadyLoading,
    Offline,
    InvalidRequest,
    Closed,
}

type Delivery = oneshot::Receiver<Result<Extraction>>;

pub struct ScreenController {
    pipeline: QueryPipeline,
    connectivity: Arc<dyn Connectivity + Send + Sync>,
    api: ApiConfig,
    presenter: RowPresenter,
    state: ScreenState,
    pending: Option<Delivery>,
    rejected: usize,
}

impl ScreenController {
    pub fn new(
        pipeline: QueryPipeline,
        connectivity: Arc<dyn Connectivity + Send + Sync>,
        api: ApiConfig,
    ) -> Self {
        Self {
            pipeline,
            connectivity,
            api,
            presenter: RowPresenter::default(),
            state: ScreenState::Idle,
            pending: None,
            rejected: 0,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn rows(&self) -> &[ArticleRow] {
        match &self.state {
            ScreenState::Ready(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Result elements skipped by the last completed fetch.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Start loading the screen for `prefs`.
    ///
    /// The fetch runs on its own tokio task; only one may be in flight.
    pub async fn open(&mut self, prefs: &Preferences) -> LoadStart {
        if self.state == ScreenState::Closed {
            return LoadStart::Closed;
        }
        if self.pending.is_some() {
            debug!("Fetch already in flight");
            return LoadStart::AlreadyLoading;
        }

        if !self.connectivity.is_online().await {
            info!("No connectivity, skipping fetch");
            self.state = ScreenState::Offline;
            return LoadStart::Offline;
        }

        let url = match SearchQuery::new(&self.api, prefs).url() {
            Ok(url) => url,
            Err(e) => {
                warn!("Could not build search url: {}", e);
                self.state = ScreenState::Empty(EmptyReason::Unreachable(e.to_string()));
                return LoadStart::InvalidRequest;
            }
        };

        let (tx, rx) = oneshot::channel();
        let pipeline = self.pipeline.clone();

        info!(
            "Loading section {} ordered by {}",
            prefs.section, prefs.order_by
        );

        tokio::spawn(async move {
            let result = pipeline.run(url.as_str()).await;
            if tx.send(result).is_err() {
                debug!("Screen closed before the fetch finished, dropping result");
            }
        });

        self.pending = Some(rx);
        self.state = ScreenState::Loading;
        LoadStart::Started
    }

    /// Apply a finished fetch without blocking. Returns true if the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.apply(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.pending = None;
                self.apply(Err(task_ended()));
                true
            }
        }
    }

    /// Wait for the in-flight fetch, if any, and apply it.
    pub async fn wait(&mut self) {
        if let Some(rx) = self.pending.take() {
            let result = rx.await.unwrap_or_else(|_| Err(task_ended()));
            self.apply(result);
        }
    }

    /// Tear the screen down. A fetch still in flight completes but its
    /// result is discarded.
    pub fn close(&mut self) {
        if self.pending.take().is_some() {
            debug!("Discarding in-flight fetch");
        }
        self.state = ScreenState::Closed;
    }

    /// Open the article behind row `index`.
    pub fn activate(&self, index: usize, navigator: &dyn Navigator) -> Result<()> {
        let row = self
            .rows()
            .get(index)
            .ok_or_else(|| NewsError::Other(format!("No article at row {}", index)))?;
        navigator.open(&row.url)
    }

    fn apply(&mut self, result: Result<Extraction>) {
        if self.state == ScreenState::Closed {
            return;
        }

        self.state = match result {
            Ok(extraction) => {
                self.rejected = extraction.rejected.len();
                if extraction.is_empty() {
                    ScreenState::Empty(EmptyReason::NoResults)
                } else {
                    ScreenState::Ready(self.presenter.present(&extraction.articles))
                }
            }
            Err(e) => {
                warn!("Loading news failed: {}", e);
                self.rejected = 0;
                ScreenState::Empty(EmptyReason::Unreachable(e.to_string()))
            }
        };
    }
}

fn task_ended() -> NewsError {
    NewsError::Other("fetch task ended without a result".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::fetcher::{FetchError, Fetcher};

    const TWO_RESULTS: &str = r#"{"response":{"results":[
        {"sectionName":"World news","webPublicationDate":"2021-05-03T10:15:00Z",
         "webTitle":"Summit ends","webUrl":"https://example.com/summit",
         "fields":{"byline":"Jane Doe"}},
        {"sectionName":"Sport","webPublicationDate":"2021-05-02T08:00:00Z",
         "webTitle":"Late winner","webUrl":"https://example.com/winner"}
    ]}}"#;

    struct ScriptedFetcher {
        response: std::result::Result<&'static str, u16>,
        calls: AtomicUsize,
        started: Notify,
        release: Option<Notify>,
    }

    impl ScriptedFetcher {
        fn new(response: std::result::Result<&'static str, u16>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
                started: Notify::new(),
                release: None,
            })
        }

        fn gated(response: &'static str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response),
                calls: AtomicUsize::new(0),
                started: Notify::new(),
                release: Some(Notify::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, _url: &str) -> std::result::Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            if let Some(release) = &self.release {
                release.notified().await;
            }
            match self.response {
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

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn open(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn controller(fetcher: Arc<ScriptedFetcher>, online: bool) -> ScreenController {
        ScreenController::new(
            QueryPipeline::new(fetcher),
            Arc::new(FixedConnectivity(online)),
            ApiConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_offline_never_fetches() {
        let fetcher = ScriptedFetcher::new(Ok(TWO_RESULTS));
        let mut screen = controller(fetcher.clone(), false);

        assert_eq!(screen.open(&Preferences::default()).await, LoadStart::Offline);
        screen.wait().await;

        assert_eq!(fetcher.calls(), 0);
        assert_eq!(screen.state(), &ScreenState::Offline);
        assert_eq!(
            screen.state().placeholder().as_deref(),
            Some(OFFLINE_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_results_become_rows() {
        let fetcher = ScriptedFetcher::new(Ok(TWO_RESULTS));
        let mut screen = controller(fetcher.clone(), true);

        assert_eq!(screen.open(&Preferences::default()).await, LoadStart::Started);
        assert_eq!(screen.state(), &ScreenState::Loading);
        screen.wait().await;

        assert_eq!(fetcher.calls(), 1);
        let rows = screen.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].section_label, "Section : World news");
        assert_eq!(rows[0].author_label.as_deref(), Some("Author : Jane Doe"));
        assert_eq!(rows[1].author_label, None);
        assert_eq!(screen.state().placeholder(), None);
    }

    #[tokio::test]
    async fn test_poll_delivers_once() {
        let fetcher = ScriptedFetcher::new(Ok(TWO_RESULTS));
        let mut screen = controller(fetcher, true);
        screen.open(&Preferences::default()).await;

        let mut changed = false;
        for _ in 0..100 {
            if screen.poll() {
                changed = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(changed);
        assert_eq!(screen.rows().len(), 2);
        assert!(!screen.poll());
    }

    #[tokio::test]
    async fn test_empty_and_failed_are_distinct() {
        let empty = ScriptedFetcher::new(Ok(r#"{"response":{"results":[]}}"#));
        let mut screen = controller(empty, true);
        screen.open(&Preferences::default()).await;
        screen.wait().await;
        assert_eq!(screen.state(), &ScreenState::Empty(EmptyReason::NoResults));
        assert_eq!(
            screen.state().placeholder().as_deref(),
            Some("No news found.")
        );

        let failing = ScriptedFetcher::new(Err(500));
        let mut screen = controller(failing, true);
        screen.open(&Preferences::default()).await;
        screen.wait().await;
        match screen.state() {
            ScreenState::Empty(EmptyReason::Unreachable(reason)) => {
                assert!(reason.contains("500"));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_flight() {
        let fetcher = ScriptedFetcher::gated(TWO_RESULTS);
        let mut screen = controller(fetcher.clone(), true);
        let prefs = Preferences::default();

        assert_eq!(screen.open(&prefs).await, LoadStart::Started);
        assert_eq!(screen.open(&prefs).await, LoadStart::AlreadyLoading);
        assert!(screen.is_loading());

        fetcher.started.notified().await;
        if let Some(release) = &fetcher.release {
            release.notify_one();
        }
        screen.wait().await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(screen.rows().len(), 2);
        assert_eq!(screen.open(&prefs).await, LoadStart::Started);
    }

    #[tokio::test]
    async fn test_close_discards_late_result() {
        let fetcher = ScriptedFetcher::gated(TWO_RESULTS);
        let mut screen = controller(fetcher.clone(), true);

        screen.open(&Preferences::default()).await;
        fetcher.started.notified().await;
        screen.close();

        if let Some(release) = &fetcher.release {
            release.notify_one();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!screen.poll());
        screen.wait().await;
        assert_eq!(screen.state(), &ScreenState::Closed);
        assert!(screen.rows().is_empty());
        assert_eq!(
            screen.open(&Preferences::default()).await,
            LoadStart::Closed
        );
    }

    #[tokio::test]
    async fn test_invalid_base_url_never_fetches() {
        let fetcher = ScriptedFetcher::new(Ok(TWO_RESULTS));
        let mut screen = ScreenController::new(
            QueryPipeline::new(fetcher.clone()),
            Arc::new(FixedConnectivity(true)),
            ApiConfig {
                base_url: "not a url".into(),
                ..ApiConfig::default()
            },
        );

        assert_eq!(
            screen.open(&Preferences::default()).await,
            LoadStart::InvalidRequest
        );
        assert_eq!(fetcher.calls(), 0);
        assert!(matches!(
            screen.state(),
            ScreenState::Empty(EmptyReason::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn test_activate_opens_row_url() {
        let fetcher = ScriptedFetcher::new(Ok(TWO_RESULTS));
        let mut screen = controller(fetcher, true);
        screen.open(&Preferences::default()).await;
        screen.wait().await;

        let navigator = RecordingNavigator::default();
        screen.activate(1, &navigator).unwrap();
        assert!(screen.activate(7, &navigator).is_err());

        assert_eq!(
            *navigator.opened.lock().unwrap(),
            vec!["https://example.com/winner".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rejected_count() {
        let body = r#"{"response":{"results":[
            {"sectionName":"A","webPublicationDate":"d","webTitle":"ok","webUrl":"https://example.com/a"},
            {"sectionName":"B","webPublicationDate":"d","webUrl":"https://example.com/b"}
        ]}}"#;
        let mut screen = controller(ScriptedFetcher::new(Ok(body)), true);
        screen.open(&Preferences::default()).await;
        screen.wait().await;

        assert_eq!(screen.rows().len(), 1);
        assert_eq!(screen.rejected(), 1);
    }
}
