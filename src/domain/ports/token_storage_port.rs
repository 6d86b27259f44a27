//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::CredentialToken;
use crate::domain::errors::StorageError;

/// Port for credential persistence operations.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Reads the stored token.
    ///
    /// A missing record is reported as [`StorageError::NotFound`], never as a default.
    async fn read_token(&self) -> Result<CredentialToken, StorageError>;

    /// Overwrites the stored token.
    async fn write_token(&self, token: &CredentialToken) -> Result<(), StorageError>;

    /// Deletes the stored token.
    async fn delete_token(&self) -> Result<(), StorageError>;

    /// Checks if a token exists.
    async fn has_token(&self) -> Result<bool, StorageError> {
        match self.read_token().await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
