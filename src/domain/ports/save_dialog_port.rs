//! Save dialog port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::PlatformError;

/// Port for asking the user where to save a file.
#[async_trait]
pub trait SaveDialogPort: Send + Sync {
    /// Prompts for a destination, proposing `default_name`.
    ///
    /// Returns `None` when the user dismisses the dialog.
    async fn choose_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, PlatformError>;
}
