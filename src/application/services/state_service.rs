//! In-memory copy of `config.json` with write-through persistence.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::AppSettings;
use crate::domain::errors::StorageError;
use crate::domain::ports::SettingsStoragePort;

/// Holds the UI state blob.
pub struct StateService {
    settings: RwLock<AppSettings>,
    storage: Arc<dyn SettingsStoragePort>,
}

impl StateService {
    /// Loads stored settings, falling back to defaults when the file is
    /// missing or unreadable.
    pub async fn load(storage: Arc<dyn SettingsStoragePort>) -> Self {
        let settings = match storage.read_settings().await {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => {
                debug!("No stored settings, using defaults");
                AppSettings::default()
            }
            Err(e) => {
                warn!(error = %e, "Stored settings unreadable, using defaults");
                AppSettings::default()
            }
        };

        Self {
            settings: RwLock::new(settings),
            storage,
        }
    }

    #[must_use]
    pub fn settings(&self) -> AppSettings {
        self.settings.read().clone()
    }

    #[must_use]
    pub fn read_state(&self) -> Value {
        self.settings.read().state.clone()
    }

    /// Replaces the state blob and persists the whole record.
    ///
    /// The in-memory copy is updated even when the write fails.
    ///
    /// # Errors
    /// Returns error if the settings file cannot be written.
    pub async fn write_state(&self, state: Value) -> Result<(), StorageError> {
        let snapshot = {
            let mut settings = self.settings.write();
            *settings = settings.with_state(state);
            settings.clone()
        };
        self.storage.write_settings(&snapshot).await
    }
}
