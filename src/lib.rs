//! # newsdesk
//!
//! A terminal reader for the Guardian content API.
//!
//! ## Architecture
//!
//! newsdesk is a single linear pipeline:
//!
//! ```text
//! Preferences → SearchQuery → Fetcher → Extractor → Presenter → UI
//! ```
//!
//! - [`fetcher`]: one HTTP GET per screen, with typed failures
//! - [`extractor`]: search response JSON to [`Article`](domain::Article)s
//! - [`query`]: fetcher and extractor composed, plus the search url builder
//! - [`presenter`]: articles to display rows
//! - [`controller`]: connectivity check, background fetch, row activation
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! newsdesk
//!
//! # Print headlines once
//! newsdesk headlines --section technology --order-by newest
//!
//! # Change the saved section
//! newsdesk settings --section world
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// query pipeline, connectivity probe and preference storage.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `headlines [--json]` - Fetch once and print rows
/// - `settings` - Show or change the saved section and order
pub mod cli;

/// Configuration file and user preferences.
///
/// Loads from `~/.config/newsdesk/config.toml`; preferences live in
/// `~/.config/newsdesk/preferences.toml`.
pub mod config;

/// Screen orchestration.
///
/// - [`ScreenController`](controller::ScreenController): single-flight background load
/// - [`Connectivity`](controller::Connectivity): network availability probe
/// - [`Navigator`](controller::Navigator): opens article urls
pub mod controller;

/// Core domain models.
pub mod domain;

/// JSON payload extraction.
pub mod extractor;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Row descriptors and date formatting.
pub mod presenter;

/// Search url building and the fetch-then-extract pipeline.
pub mod query;

/// Terminal user interface.
///
/// Headline list, article detail pane and status bar, with a settings
/// overlay. Keybindings: j/k navigate, Enter/o opens in browser,
/// R reloads, s opens settings, q quits.
pub mod tui;
