//! Startup session restore.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::TokenSource;
use crate::application::services::SessionController;
use crate::domain::errors::{AuthError, StorageError};
use crate::domain::ports::TokenStoragePort;

/// Loads the token from a previous run into the session controller.
pub struct RestoreSessionUseCase {
    storage_port: Arc<dyn TokenStoragePort>,
    sessions: Arc<SessionController>,
}

impl RestoreSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(storage_port: Arc<dyn TokenStoragePort>, sessions: Arc<SessionController>) -> Self {
        Self {
            storage_port,
            sessions,
        }
    }

    /// Returns the source of the restored session, or `None` if there is no
    /// usable stored token.
    ///
    /// A malformed token file counts as no token.
    ///
    /// # Errors
    /// Returns error if the token file exists but cannot be read.
    pub async fn execute(&self) -> Result<Option<TokenSource>, AuthError> {
        match self.storage_port.read_token().await {
            Ok(token) => {
                info!(token = %token.masked(), "Restored stored session");
                self.sessions.restore(token);
                Ok(Some(TokenSource::Stored))
            }
            Err(e) if e.is_not_found() => {
                debug!("No stored token");
                Ok(None)
            }
            Err(e @ StorageError::Json { .. }) => {
                warn!(error = %e, "Ignoring malformed token file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
