use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{DataDir, json_file};
use crate::domain::entities::AppSettings;
use crate::domain::errors::StorageError;
use crate::domain::ports::SettingsStoragePort;

/// Stores [`AppSettings`] in `<data dir>/config.json`.
pub struct FileSettingsStorage {
    path: PathBuf,
}

impl FileSettingsStorage {
    #[must_use]
    pub fn new(data_dir: &DataDir) -> Self {
        Self {
            path: data_dir.settings_path(),
        }
    }
}

#[async_trait]
impl SettingsStoragePort for FileSettingsStorage {
    async fn read_settings(&self) -> Result<AppSettings, StorageError> {
        debug!(path = %self.path.display(), "Reading settings");
        json_file::read(&self.path).await
    }

    async fn write_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Writing settings");
        json_file::write(&self.path, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_settings_round_trip_on_disk() {
        let dir = tempdir().unwrap();
        let storage = FileSettingsStorage::new(&DataDir::with_dir(dir.path().to_path_buf()));
        let settings = AppSettings::default().with_state(json!({"level": "gold", "sort": [1, 2]}));

        storage.write_settings(&settings).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("config.json")).unwrap())
                .unwrap();
        assert_eq!(
            raw,
            json!({"width": 800, "height": 600, "state": {"level": "gold", "sort": [1, 2]}})
        );
        assert_eq!(storage.read_settings().await.unwrap(), settings);
    }
}
