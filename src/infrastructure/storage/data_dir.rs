use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;

use crate::domain::errors::StorageError;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tukija";
const APP_NAME: &str = "tukija";

/// Name of the credential record.
pub const TOKEN_FILE_NAME: &str = ".token.json";
/// Name of the settings record.
pub const SETTINGS_FILE_NAME: &str = "config.json";
/// Name of the log file.
pub const LOG_FILE_NAME: &str = "tukija.log";

/// Per-user application data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Resolves the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DataDirUnavailable` if no home directory can be determined.
    pub fn new() -> Result<Self, StorageError> {
        Self::platform_default()
            .map(|root| Self { root })
            .ok_or(StorageError::DataDirUnavailable)
    }

    /// Uses a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { root: path }
    }

    /// Returns the platform default without touching the filesystem.
    #[must_use]
    pub fn platform_default() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.root.join(TOKEN_FILE_NAME)
    }

    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE_NAME)
    }

    /// Ensures the directory exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn ensure(&self) -> Result<(), StorageError> {
        if !tokio::fs::try_exists(&self.root).await.unwrap_or(false) {
            info!(path = %self.root.display(), "Creating data directory");
            tokio::fs::create_dir_all(&self.root)
                .await
                .map_err(|e| StorageError::io(&self.root, e))?;
        }
        Ok(())
    }
}
