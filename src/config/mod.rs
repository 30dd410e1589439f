//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! User preferences (section and sort order) live next to it in
//! `preferences.toml`, see [`preferences`].

pub mod colors;
pub mod preferences;

pub use colors::ColorConfig;
pub use preferences::{OrderBy, Preferences};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::controller::DEFAULT_PROBE_TIMEOUT;
use crate::fetcher::http_fetcher::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};

pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com";
pub const DEFAULT_API_KEY: &str = "test";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub colors: ColorConfig,
}

/// Content API endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    /// How long the connectivity check may spend resolving the api host
    pub probe_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
            read_timeout_ms: DEFAULT_READ_TIMEOUT.as_millis() as u64,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            write_file(config_path, DEFAULT_CONFIG)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }
}

pub(crate) fn config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("newsdesk"))
}

/// Write `content` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, content).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

const DEFAULT_CONFIG: &str = r##"# newsdesk configuration
#
# Colors can be any ratatui color name (Black, Red, Green, Yellow, Blue,
# Magenta, Cyan, Gray, DarkGray, LightRed, ..., White, Reset) or a hex
# value like "#RRGGBB".

[api]
# Content API root; requests go to <base_url>/search
base_url = "https://content.guardianapis.com"

# Static API key sent as the api-key query parameter
api_key = "test"

# Timeouts in milliseconds
connect_timeout_ms = 15000
read_timeout_ms = 10000

# Connectivity check: give up resolving the api host after this long
probe_timeout_ms = 3000

[colors]
border = "Cyan"
selection_bg = "Cyan"
selection_fg = "Black"
section = "LightBlue"
author = "Yellow"
date = "Yellow"
link = "Blue"
empty_state = "DarkGray"
status_fg = "White"
status_bg = "DarkGray"
"##;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
