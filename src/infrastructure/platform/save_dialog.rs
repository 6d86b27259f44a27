use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::PlatformError;
use crate::domain::ports::SaveDialogPort;

/// Native "Save as" dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSaveDialog;

impl NativeSaveDialog {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SaveDialogPort for NativeSaveDialog {
    async fn choose_save_path(&self, default_name: &str) -> Result<Option<PathBuf>, PlatformError> {
        let default_name = default_name.to_string();

        // The dialog blocks until dismissed; keep it off the runtime workers.
        let path = tokio::task::spawn_blocking(move || {
            rfd::FileDialog::new()
                .set_file_name(default_name)
                .save_file()
        })
        .await
        .map_err(|e| PlatformError::dialog(e.to_string()))?;

        debug!(canceled = path.is_none(), "Save dialog closed");
        Ok(path)
    }
}
