mod authorization_port;
mod browser_port;
mod save_dialog_port;
mod settings_storage_port;
mod token_storage_port;
mod youtube_port;

pub use authorization_port::AuthorizationPort;
pub use browser_port::BrowserPort;
pub use save_dialog_port::SaveDialogPort;
pub use settings_storage_port::SettingsStoragePort;
pub use token_storage_port::TokenStoragePort;
pub use youtube_port::YouTubePort;
