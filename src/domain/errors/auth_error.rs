//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("an authorization handshake is already in progress")]
    HandshakeInProgress,

    #[error("callback listener failed: {message}")]
    ListenerFailed { message: String },

    #[error("failed to launch browser: {message}")]
    BrowserLaunchFailed { message: String },

    #[error("authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("authorization code exchange failed: {message}")]
    CodeExchangeFailed { message: String },

    #[error("token refresh failed: {message}")]
    RefreshFailed { message: String },

    #[error("timed out after {secs}s waiting for the browser redirect")]
    Timeout { secs: u64 },

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("credential storage error: {0}")]
    Storage(#[from] super::StorageError),

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates listener error.
    #[must_use]
    pub fn listener(message: impl Into<String>) -> Self {
        Self::ListenerFailed {
            message: message.into(),
        }
    }

    /// Creates browser launch error.
    #[must_use]
    pub fn browser(message: impl Into<String>) -> Self {
        Self::BrowserLaunchFailed {
            message: message.into(),
        }
    }

    /// Creates denied error.
    #[must_use]
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            reason: reason.into(),
        }
    }

    /// Creates exchange error.
    #[must_use]
    pub fn exchange(message: impl Into<String>) -> Self {
        Self::CodeExchangeFailed {
            message: message.into(),
        }
    }

    /// Creates refresh error.
    #[must_use]
    pub fn refresh(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the user can simply try signing in again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::AuthorizationDenied { .. }
                | Self::HandshakeInProgress
                | Self::NotAuthenticated
        )
    }
}
