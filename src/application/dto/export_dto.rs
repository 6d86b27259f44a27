//! Roster export DTOs.

use std::path::PathBuf;

use serde::Serialize;

/// Result of a save request, shaped like a native dialog result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    /// Whether the user dismissed the dialog.
    pub canceled: bool,
    /// Destination written, absent when canceled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl SaveOutcome {
    #[must_use]
    pub const fn canceled() -> Self {
        Self {
            canceled: true,
            file_path: None,
        }
    }

    #[must_use]
    pub const fn saved(path: PathBuf) -> Self {
        Self {
            canceled: false,
            file_path: Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        assert_eq!(
            serde_json::to_value(SaveOutcome::canceled()).unwrap(),
            json!({"canceled": true})
        );
        assert_eq!(
            serde_json::to_value(SaveOutcome::saved(PathBuf::from("/tmp/members.csv"))).unwrap(),
            json!({"canceled": false, "filePath": "/tmp/members.csv"})
        );
    }
}
