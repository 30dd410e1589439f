use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::{Config, Preferences};
use crate::controller::{Connectivity, DnsConnectivity, ScreenController};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::query::QueryPipeline;

pub struct AppContext {
    pub config: Config,
    pub pipeline: QueryPipeline,
    pub connectivity: Arc<dyn Connectivity + Send + Sync>,
    pub preferences_path: PathBuf,
}

impl AppContext {
    pub fn new(config: Config, preferences_path: Option<PathBuf>) -> Result<Self> {
        let preferences_path = match preferences_path {
            Some(p) => p,
            None => Preferences::default_path()?,
        };

        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::from_config(&config.api)?);
        let probe = DnsConnectivity::for_base_url(&config.api.base_url)
            .with_timeout(Duration::from_millis(config.api.probe_timeout_ms));
        let connectivity: Arc<dyn Connectivity + Send + Sync> = Arc::new(probe);

        Ok(Self::with_parts(config, fetcher, connectivity, preferences_path))
    }

    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        connectivity: Arc<dyn Connectivity + Send + Sync>,
        preferences_path: PathBuf,
    ) -> Self {
        Self {
            config,
            pipeline: QueryPipeline::new(fetcher),
            connectivity,
            preferences_path,
        }
    }

    pub fn load_preferences(&self) -> Result<Preferences> {
        Ok(Preferences::load_from(&self.preferences_path)?)
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        Ok(prefs.save_to(&self.preferences_path)?)
    }

    /// A fresh controller for one screen.
    pub fn screen(&self) -> ScreenController {
        ScreenController::new(
            self.pipeline.clone(),
            self.connectivity.clone(),
            self.config.api.clone(),
        )
    }
}
