//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Google OAuth and YouTube API clients.
pub mod google;
/// OAuth redirect listener.
pub mod loopback;
/// Browser and dialog integrations.
pub mod platform;
/// Local JSON persistence.
pub mod storage;

pub use config::{AppConfig, CliArgs, Command, LogLevel};
pub use google::{ClientCredentials, GoogleOAuthClient, YouTubeClient};
pub use loopback::LoopbackListener;
pub use platform::{NativeSaveDialog, SystemBrowser};
pub use storage::{DataDir, FileSettingsStorage, FileTokenStorage};
