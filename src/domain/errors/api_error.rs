//! YouTube Data API error types.

use thiserror::Error;

use super::AuthError;

/// API call error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("request rejected as unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("access denied: {message}")]
    Forbidden { message: String },

    #[error("the authenticated account has no YouTube channel")]
    ChannelNotFound,

    #[error("YouTube API returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode API response: {message}")]
    Decode { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates remote error.
    #[must_use]
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}
