//! Whole-file JSON records.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::errors::StorageError;

/// Reads and decodes `path`.
pub(super) async fn read<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::io(path, e))?;
    serde_json::from_slice(&content).map_err(|e| StorageError::json(path, e))
}

/// Replaces `path` with the encoding of `data`.
///
/// The record is staged in a sibling temp file and renamed into place, so
/// readers see either the old or the new record.
pub(super) async fn write<T: Serialize>(path: &Path, data: &T) -> Result<(), StorageError> {
    let content = serde_json::to_vec(data).map_err(|e| StorageError::json(path, e))?;
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || persist(&target, &content))
        .await
        .map_err(|e| StorageError::io(path, std::io::Error::other(e)))?
}

fn persist(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::io(path, std::io::Error::other("invalid path")))?;
    std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| StorageError::io(path, e))?;
    temp_file
        .write_all(content)
        .map_err(|e| StorageError::io(path, e))?;
    temp_file
        .persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;

    Ok(())
}

/// Removes `path`.
pub(super) async fn remove(path: &Path) -> Result<(), StorageError> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| StorageError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_parent_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("record.json");

        write(&path, &json!({"a": 1})).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
        let value: Value = read(&path).await.unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let result: Result<Value, _> = read(&dir.path().join("absent.json")).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_read_truncated_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"access_token\": \"ya29").unwrap();

        let result: Result<Value, _> = read(&path).await;
        assert!(matches!(result, Err(StorageError::Json { .. })));
    }
}
