use tracing::info;

use crate::app::{NewsError, Result};

/// Hands an article url to something that can display it.
pub trait Navigator {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens urls in the system browser.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<()> {
        info!("Opening {}", url);
        open::that(url).map_err(|e| NewsError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
