use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted UI settings (`config.json`).
///
/// `state` is owned by the UI and round-tripped verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "empty_state")]
    pub state: Value,
}

const fn default_width() -> u32 {
    800
}

const fn default_height() -> u32 {
    600
}

fn empty_state() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            state: empty_state(),
        }
    }
}

impl AppSettings {
    /// Returns a copy with `state` replaced.
    #[must_use]
    pub fn with_state(&self, state: Value) -> Self {
        Self {
            width: self.width,
            height: self.height,
            state,
        }
    }
}
