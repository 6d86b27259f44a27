//! Ownership of the signed-in session.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::handshake::OAuthHandshake;
use crate::domain::entities::{CredentialToken, SessionHandle};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthorizationPort, TokenStoragePort};

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    SignedOut,
    Authenticating,
    Authorized(SessionHandle),
}

/// Single owner of the authentication state.
///
/// Handlers receive the controller and ask it for a [`SessionHandle`]; nothing
/// else mutates the session. Token-file mutations made here are serialized by
/// `token_writes`, so a sign-out can never be followed by a stale persist.
pub struct SessionController {
    state: RwLock<SessionState>,
    token_writes: Mutex<()>,
    handshake: OAuthHandshake,
    authorization: Arc<dyn AuthorizationPort>,
    storage: Arc<dyn TokenStoragePort>,
}

impl SessionController {
    #[must_use]
    pub fn new(
        handshake: OAuthHandshake,
        authorization: Arc<dyn AuthorizationPort>,
        storage: Arc<dyn TokenStoragePort>,
    ) -> Self {
        Self {
            state: RwLock::new(SessionState::SignedOut),
            token_writes: Mutex::new(()),
            handshake,
            authorization,
            storage,
        }
    }

    /// Installs a previously stored token as the current session.
    pub fn restore(&self, token: CredentialToken) {
        *self.state.write() = SessionState::Authorized(SessionHandle::new(token));
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::Authorized(_))
    }

    /// Runs the browser sign-in and makes its token the current session.
    ///
    /// # Errors
    /// Returns `HandshakeInProgress` if another sign-in is pending, otherwise
    /// whatever the handshake failed with. On failure the session is signed out
    /// and the stored token is left untouched.
    pub async fn authenticate(&self) -> Result<SessionHandle, AuthError> {
        let guard = self.begin_handshake()?;

        match self.handshake.run().await {
            Ok(token) => {
                let handle = SessionHandle::new(token);
                guard.finish(SessionState::Authorized(handle.clone()));
                info!("Signed in");
                Ok(handle)
            }
            Err(e) => {
                guard.finish(SessionState::SignedOut);
                Err(e)
            }
        }
    }

    fn begin_handshake(&self) -> Result<HandshakeGuard<'_>, AuthError> {
        let mut state = self.state.write();
        if matches!(*state, SessionState::Authenticating) {
            warn!("Rejecting sign-in while another is pending");
            return Err(AuthError::HandshakeInProgress);
        }
        *state = SessionState::Authenticating;
        Ok(HandshakeGuard {
            state: &self.state,
            finished: false,
        })
    }

    /// Returns the current session, refreshing an expired access token first.
    ///
    /// # Errors
    /// Returns `NotAuthenticated` when signed out, or the refresh failure.
    pub async fn session(&self) -> Result<SessionHandle, AuthError> {
        let current = match &*self.state.read() {
            SessionState::Authorized(handle) => handle.clone(),
            _ => return Err(AuthError::NotAuthenticated),
        };

        if !current.needs_refresh(Utc::now()) {
            return Ok(current);
        }

        debug!("Access token expired, refreshing");
        let issued = self.authorization.refresh(current.token()).await?;
        let refreshed = SessionHandle::new(current.token().refreshed_with(issued));

        let _writes = self.token_writes.lock().await;
        if !self.is_current(&current) {
            debug!("Session changed during refresh, discarding refreshed token");
            return match &*self.state.read() {
                SessionState::Authorized(handle) => Ok(handle.clone()),
                _ => Err(AuthError::NotAuthenticated),
            };
        }

        if let Err(e) = self.storage.write_token(refreshed.token()).await {
            warn!(error = %e, "Failed to persist refreshed token");
        }

        let mut state = self.state.write();
        if matches!(&*state, SessionState::Authorized(handle) if handle.same_as(&current)) {
            *state = SessionState::Authorized(refreshed.clone());
        }
        Ok(refreshed)
    }

    fn is_current(&self, session: &SessionHandle) -> bool {
        matches!(&*self.state.read(), SessionState::Authorized(handle) if handle.same_as(session))
    }

    /// Drops the session and deletes the stored token.
    ///
    /// # Errors
    /// Returns error if the token file exists but cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let _writes = self.token_writes.lock().await;
        *self.state.write() = SessionState::SignedOut;
        info!("Signed out");

        match self.storage.delete_token().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!("No stored token to delete");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Resets the state if a sign-in future is dropped before it completes.
struct HandshakeGuard<'a> {
    state: &'a RwLock<SessionState>,
    finished: bool,
}

impl HandshakeGuard<'_> {
    fn finish(mut self, next: SessionState) {
        *self.state.write() = next;
        self.finished = true;
    }
}

impl Drop for HandshakeGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.state.write();
        if matches!(*state, SessionState::Authenticating) {
            *state = SessionState::SignedOut;
        }
    }
}
