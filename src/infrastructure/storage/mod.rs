//! Local persistence adapters.

mod data_dir;
mod json_file;
mod settings_file;
mod token_file;

pub use data_dir::{DataDir, LOG_FILE_NAME, SETTINGS_FILE_NAME, TOKEN_FILE_NAME};
pub use settings_file::FileSettingsStorage;
pub use token_file::FileTokenStorage;
