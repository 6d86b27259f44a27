//! Application configuration.

use std::net::{IpAddr, Ipv6Addr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::infrastructure::storage::DataDir;

const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 300;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Effective runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth client identifier (may be empty; Google rejects the sign-in then).
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// Data directory override.
    pub data_dir: Option<PathBuf>,

    /// Log file path override.
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    pub log_level: LogLevel,

    /// Address the redirect listener binds to.
    pub callback_host: IpAddr,

    /// How long a sign-in may wait for the browser redirect.
    pub auth_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            data_dir: None,
            log_path: None,
            log_level: LogLevel::Info,
            callback_host: IpAddr::V6(Ipv6Addr::LOCALHOST),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Builds configuration from defaults overridden by CLI arguments.
    #[must_use]
    pub fn from_args(args: &CliArgs) -> Self {
        let mut config = Self::default();
        config.merge_with_args(args);
        config
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(client_id) = &args.client_id {
            self.client_id.clone_from(client_id);
        }
        if let Some(client_secret) = &args.client_secret {
            self.client_secret.clone_from(client_secret);
        }
        if let Some(data_dir) = &args.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(callback_host) = args.callback_host {
            self.callback_host = callback_host;
        }
        if let Some(secs) = args.auth_timeout {
            self.auth_timeout = Duration::from_secs(secs);
        }
    }

    /// Returns whether both OAuth client values are present.
    #[must_use]
    pub fn has_client_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Returns effective data directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(DataDir::platform_default)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| {
                self.effective_data_dir()
                    .map(|dir| DataDir::with_dir(dir).log_path())
            })
    }
}
