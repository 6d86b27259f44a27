//! File-backed credential storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{DataDir, json_file};
use crate::domain::entities::CredentialToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

/// Stores the credential as JSON in `<data dir>/.token.json`.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(data_dir: &DataDir) -> Self {
        Self {
            path: data_dir.token_path(),
        }
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn read_token(&self) -> Result<CredentialToken, StorageError> {
        debug!(path = %self.path.display(), "Reading stored token");
        json_file::read(&self.path).await
    }

    async fn write_token(&self, token: &CredentialToken) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), token = %token.masked(), "Storing token");
        json_file::write(&self.path, token).await.map_err(|e| {
            warn!(error = %e, "Failed to store token");
            e
        })
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Deleting stored token");
        json_file::remove(&self.path).await
    }
}
