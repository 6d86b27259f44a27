use tracing::{debug, warn};

use crate::domain::errors::PlatformError;
use crate::domain::ports::BrowserPort;

/// Opens URLs with the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BrowserPort for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), PlatformError> {
        debug!("Opening URL in default browser");
        opener::open_browser(url).map_err(|e| {
            warn!(error = %e, "Failed to open browser");
            PlatformError::browser(e.to_string())
        })
    }
}
