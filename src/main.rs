use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tukija::infrastructure::{AppConfig, CliArgs, Command};
use tukija::presentation::App;

/// Logs go to a file only; stdout carries bus replies.
fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = AppConfig::from_args(&args);
    init_logging(&config)?;

    let command = args.command.unwrap_or_default();
    info!(version = tukija::VERSION, ?command, "Starting {}", tukija::NAME);

    let app = App::from_config(&config)?;

    match command {
        Command::Serve => app.serve_stdio().await,
        Command::Status => {
            let report = app.status().await?;
            println!("{report}");
            Ok(())
        }
        Command::Login => {
            let source = app.login().await?;
            println!("signed in ({source})");
            Ok(())
        }
        Command::Logout => {
            app.logout().await?;
            println!("signed out");
            Ok(())
        }
    }
}
