//! Errors from operating-system collaborators (browser, dialogs, user files).

use std::path::PathBuf;

use thiserror::Error;

/// Platform error variants.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to open browser: {message}")]
    BrowserLaunch { message: String },

    #[error("save dialog failed: {message}")]
    Dialog { message: String },

    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlatformError {
    /// Creates browser launch error.
    #[must_use]
    pub fn browser(message: impl Into<String>) -> Self {
        Self::BrowserLaunch {
            message: message.into(),
        }
    }

    /// Creates dialog error.
    #[must_use]
    pub fn dialog(message: impl Into<String>) -> Self {
        Self::Dialog {
            message: message.into(),
        }
    }

    /// Creates write error.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
