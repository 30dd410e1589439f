//! Persisted user choices: which section to read and how to sort it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{config_dir, write_file, ConfigError};

pub const DEFAULT_SECTION: &str = "politics";

/// Sections offered by the settings overlay. Any section id is accepted
/// from the command line.
pub const SECTIONS: &[&str] = &[
    "politics",
    "world",
    "uk-news",
    "us-news",
    "business",
    "technology",
    "science",
    "environment",
    "sport",
    "football",
    "culture",
    "commentisfree",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    pub const ALL: [OrderBy; 3] = [OrderBy::Newest, OrderBy::Oldest, OrderBy::Relevance];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
        }
    }

    pub fn next(self) -> Self {
        match self {
            OrderBy::Newest => OrderBy::Oldest,
            OrderBy::Oldest => OrderBy::Relevance,
            OrderBy::Relevance => OrderBy::Newest,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            OrderBy::Newest => OrderBy::Relevance,
            OrderBy::Oldest => OrderBy::Newest,
            OrderBy::Relevance => OrderBy::Oldest,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub section: String,
    pub order_by: OrderBy,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            order_by: OrderBy::default(),
        }
    }
}

impl Preferences {
    /// `~/.config/newsdesk/preferences.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("preferences.toml"))
    }

    /// Read preferences, falling back to defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut prefs: Preferences = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if prefs.section.trim().is_empty() {
            prefs.section = DEFAULT_SECTION.to_string();
        }

        Ok(prefs)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(self)?;
        write_file(path, &content)
    }

    /// Step to the next (or previous) entry of [`SECTIONS`]. A section that
    /// isn't in the list restarts from the first entry.
    pub fn cycle_section(&mut self, forward: bool) {
        let len = SECTIONS.len();
        let next = match SECTIONS.iter().position(|s| *s == self.section) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.section = SECTIONS[next].to_string();
    }
}
