//! Settings storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AppSettings;
use crate::domain::errors::StorageError;

/// Port for persisting [`AppSettings`].
#[async_trait]
pub trait SettingsStoragePort: Send + Sync {
    /// Reads stored settings; a missing record is [`StorageError::NotFound`].
    async fn read_settings(&self) -> Result<AppSettings, StorageError>;

    /// Overwrites stored settings.
    async fn write_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}
