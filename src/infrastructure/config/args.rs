use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tukija",
    version,
    about = "Sign in with Google and export your YouTube channel's members",
    long_about = None
)]
pub struct CliArgs {
    /// OAuth client identifier.
    #[arg(long, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth client secret.
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Directory holding the stored token and settings.
    #[arg(long, value_name = "PATH", env = "TUKIJA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Loopback address for the sign-in redirect listener.
    #[arg(long, value_name = "ADDR")]
    pub callback_host: Option<IpAddr>,

    /// Seconds to wait for the browser sign-in to complete.
    #[arg(long, value_name = "SECONDS")]
    pub auth_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve UI requests as JSON lines on stdin/stdout.
    #[default]
    Serve,
    /// Report whether a stored sign-in exists.
    Status,
    /// Sign in through the browser and store the token.
    Login,
    /// Forget the stored token.
    Logout,
}
