//! Authorized session handle.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::CredentialToken;

/// Authorization bound to exactly one [`CredentialToken`].
///
/// Handles are immutable; a refreshed token yields a new handle.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    token: Arc<CredentialToken>,
}

impl SessionHandle {
    /// Creates handle for token.
    #[must_use]
    pub fn new(token: CredentialToken) -> Self {
        Self {
            token: Arc::new(token),
        }
    }

    /// Returns the underlying credential.
    #[must_use]
    pub fn token(&self) -> &CredentialToken {
        &self.token
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        self.token.authorization_header()
    }

    /// Returns whether the access token should be refreshed before use.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.token.is_expired_at(now) && self.token.can_refresh()
    }

    /// Returns whether both handles wrap the same token instance.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.token, &other.token)
    }
}
