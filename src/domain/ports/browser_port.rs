//! Browser launcher port definition.

use crate::domain::errors::PlatformError;

/// Port for handing URLs to the system's default browser.
pub trait BrowserPort: Send + Sync {
    /// Opens `url` outside the application.
    ///
    /// # Errors
    /// Returns error if no browser could be launched.
    fn open(&self, url: &str) -> Result<(), PlatformError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Browser that records opened URLs.
    #[derive(Default)]
    pub struct RecordingBrowser {
        opened: Mutex<Vec<String>>,
    }

    impl RecordingBrowser {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn opened(&self) -> Vec<String> {
            self.opened.lock().clone()
        }
    }

    impl BrowserPort for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), PlatformError> {
            self.opened.lock().push(url.to_string());
            Ok(())
        }
    }
}
