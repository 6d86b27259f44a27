//! Roster export use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::SaveOutcome;
use crate::domain::errors::PlatformError;
use crate::domain::ports::SaveDialogPort;

/// File name proposed by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "members.csv";

/// Writes UI-formatted roster text to a user-chosen file.
pub struct ExportRosterUseCase {
    dialog: Arc<dyn SaveDialogPort>,
}

impl ExportRosterUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(dialog: Arc<dyn SaveDialogPort>) -> Self {
        Self { dialog }
    }

    /// Prompts for a destination and writes `contents` there verbatim.
    ///
    /// Canceling writes nothing.
    ///
    /// # Errors
    /// Returns error if the dialog fails or the file cannot be written.
    pub async fn execute(&self, contents: &str) -> Result<SaveOutcome, PlatformError> {
        let Some(path) = self.dialog.choose_save_path(DEFAULT_EXPORT_NAME).await? else {
            debug!("Save dialog canceled");
            return Ok(SaveOutcome::canceled());
        };

        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| PlatformError::write(&path, e))?;

        info!(path = %path.display(), bytes = contents.len(), "Roster exported");
        Ok(SaveOutcome::saved(path))
    }
}
