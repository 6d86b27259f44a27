//! Composition root wiring adapters into the bus.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tokio::io::BufReader;
use tracing::{info, warn};

use super::bus::BusHandle;
use super::dispatcher::Dispatcher;
use super::stdio;
use crate::application::dto::TokenSource;
use crate::application::services::{
    HandshakeSettings, MembershipService, OAuthHandshake, SessionController, StateService,
};
use crate::application::use_cases::{ExportRosterUseCase, RestoreSessionUseCase};
use crate::domain::ports::{
    BrowserPort, SaveDialogPort, SettingsStoragePort, TokenStoragePort, YouTubePort,
};
use crate::infrastructure::{
    AppConfig, ClientCredentials, DataDir, FileSettingsStorage, FileTokenStorage,
    GoogleOAuthClient, NativeSaveDialog, SystemBrowser, YouTubeClient,
};

/// Outcome of the `status` command.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub data_dir: PathBuf,
    pub source: Option<TokenSource>,
    pub channel_id: Option<String>,
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data directory: {}", self.data_dir.display())?;
        match (&self.source, &self.channel_id) {
            (None, _) => write!(f, "signed out"),
            (Some(source), Some(channel)) => write!(f, "signed in ({source}), channel {channel}"),
            (Some(source), None) => write!(f, "signed in ({source}), channel unavailable"),
        }
    }
}

/// Long-lived services for one process run.
pub struct App {
    data_dir: DataDir,
    sessions: Arc<SessionController>,
    tokens: Arc<dyn TokenStoragePort>,
    settings: Arc<dyn SettingsStoragePort>,
    youtube: Arc<dyn YouTubePort>,
    browser: Arc<dyn BrowserPort>,
    dialog: Arc<dyn SaveDialogPort>,
}

impl App {
    /// Builds production adapters from `config`.
    ///
    /// # Errors
    /// Returns error if no data directory is available or an HTTP client
    /// cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let data_dir = match &config.data_dir {
            Some(dir) => DataDir::with_dir(dir.clone()),
            None => DataDir::new()?,
        };

        if !config.has_client_credentials() {
            warn!("GOOGLE_CLIENT_ID or GOOGLE_CLIENT_SECRET missing; sign-in will be rejected");
        }
        let authorization = Arc::new(GoogleOAuthClient::new(ClientCredentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })?);
        let tokens: Arc<dyn TokenStoragePort> = Arc::new(FileTokenStorage::new(&data_dir));
        let settings: Arc<dyn SettingsStoragePort> = Arc::new(FileSettingsStorage::new(&data_dir));
        let browser: Arc<dyn BrowserPort> = Arc::new(SystemBrowser::new());

        let handshake = OAuthHandshake::new(
            authorization.clone(),
            browser.clone(),
            tokens.clone(),
            HandshakeSettings {
                callback_host: config.callback_host,
                timeout: config.auth_timeout,
            },
        );
        let sessions = Arc::new(SessionController::new(handshake, authorization, tokens.clone()));

        Ok(Self {
            data_dir,
            sessions,
            tokens,
            settings,
            youtube: Arc::new(YouTubeClient::new()?),
            browser,
            dialog: Arc::new(NativeSaveDialog::new()),
        })
    }

    async fn restore(&self) -> Result<Option<TokenSource>> {
        self.data_dir.ensure().await?;
        let source = RestoreSessionUseCase::new(self.tokens.clone(), self.sessions.clone())
            .execute()
            .await?;
        Ok(source)
    }

    async fn dispatcher(&self) -> Arc<Dispatcher> {
        let state = Arc::new(StateService::load(self.settings.clone()).await);
        Arc::new(Dispatcher::new(
            self.sessions.clone(),
            MembershipService::new(self.sessions.clone(), self.youtube.clone()),
            state,
            ExportRosterUseCase::new(self.dialog.clone()),
            self.browser.clone(),
        ))
    }

    /// Restores the session and returns an in-process bus.
    ///
    /// # Errors
    /// Returns error if the data directory or stored token cannot be read.
    pub async fn bus(&self) -> Result<BusHandle> {
        self.restore().await?;
        Ok(BusHandle::new(self.dispatcher().await))
    }

    /// Serves the JSON-lines bus on stdin/stdout until stdin closes.
    ///
    /// # Errors
    /// Returns error if startup fails or stdin cannot be read.
    pub async fn serve_stdio(&self) -> Result<()> {
        let source = self.restore().await?;
        info!(signed_in = source.is_some(), "Serving bus on stdio");

        let dispatcher = self.dispatcher().await;
        stdio::serve(
            dispatcher,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
        .await
        .wrap_err("bus input failed")
    }

    /// Reports the stored sign-in and, when possible, the channel it belongs to.
    ///
    /// # Errors
    /// Returns error if the data directory or stored token cannot be read.
    pub async fn status(&self) -> Result<StatusReport> {
        let source = self.restore().await?;
        let channel_id = if source.is_some() {
            MembershipService::new(self.sessions.clone(), self.youtube.clone())
                .channel()
                .await
                .map_err(|e| warn!(error = %e, "Channel lookup failed"))
                .ok()
                .map(|channel| channel.id)
        } else {
            None
        };

        Ok(StatusReport {
            data_dir: self.data_dir.path().to_path_buf(),
            source,
            channel_id,
        })
    }

    /// Runs the browser sign-in and stores the token.
    ///
    /// # Errors
    /// Returns error if the sign-in fails.
    pub async fn login(&self) -> Result<TokenSource> {
        self.data_dir.ensure().await?;
        self.sessions
            .authenticate()
            .await
            .wrap_err("Unable to authenticate with Google")?;
        Ok(TokenSource::Handshake)
    }

    /// Deletes the stored token.
    ///
    /// # Errors
    /// Returns error if the token file cannot be removed.
    pub async fn logout(&self) -> Result<()> {
        self.sessions.sign_out().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CredentialToken;
    use crate::presentation::protocol::Operation;
    use serde_json::{Value, json};
    use std::path::Path;

    #[test]
    fn test_status_report_wording() {
        let report = StatusReport {
            data_dir: Path::new("/data").to_path_buf(),
            source: Some(TokenSource::Stored),
            channel_id: Some("UC_creator".to_string()),
        };

        assert_eq!(
            report.to_string(),
            "data directory: /data\nsigned in (stored token), channel UC_creator"
        );
    }

    #[tokio::test]
    async fn test_status_without_token_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: Some(dir.path().join("tukija")),
            ..AppConfig::default()
        };
        let app = App::from_config(&config).unwrap();

        let report = app.status().await.unwrap();

        assert!(report.source.is_none());
        assert!(report.channel_id.is_none());
        assert!(dir.path().join("tukija").is_dir());
    }

    #[tokio::test]
    async fn test_bus_restores_stored_session() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::with_dir(dir.path().to_path_buf());
        FileTokenStorage::new(&data_dir)
            .write_token(&CredentialToken::new("ya29.stored"))
            .await
            .unwrap();
        let config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let app = App::from_config(&config).unwrap();

        let bus = app.bus().await.unwrap();
        let reply = bus.call(Operation::IsAuthenticated, Value::Null).await.unwrap();

        assert_eq!(reply.payload, json!({"isAuthenticated": true}));
    }

    #[tokio::test]
    async fn test_logout_without_token_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let app = App::from_config(&config).unwrap();

        app.logout().await.unwrap();
    }
}
