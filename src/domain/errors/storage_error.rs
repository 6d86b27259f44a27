//! Local persistence error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Persistence error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no record at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to determine application data directory")]
    DataDirUnavailable,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Creates not-found error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Maps an I/O error, folding `ErrorKind::NotFound` into [`StorageError::NotFound`].
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Creates json error.
    #[must_use]
    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns whether the record simply does not exist yet.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
