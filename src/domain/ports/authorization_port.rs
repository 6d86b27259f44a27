//! OAuth authorization server port definition.

use async_trait::async_trait;

use crate::domain::entities::CredentialToken;
use crate::domain::errors::AuthError;

/// Port for the provider side of the authorization-code flow.
#[async_trait]
pub trait AuthorizationPort: Send + Sync {
    /// Builds the consent URL that redirects back to `redirect_uri`.
    ///
    /// # Errors
    /// Returns error if the configured endpoint is not a valid URL.
    fn authorization_url(&self, redirect_uri: &str) -> Result<String, AuthError>;

    /// Exchanges an authorization code for a token.
    ///
    /// `redirect_uri` must be the exact URI used to obtain the code.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<CredentialToken, AuthError>;

    /// Obtains a new access token using the refresh token in `token`.
    async fn refresh(&self, token: &CredentialToken) -> Result<CredentialToken, AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock authorization server for testing.
    pub struct MockAuthorization {
        should_succeed: bool,
        issued: CredentialToken,
        refresh_delay: Duration,
        exchanges: Mutex<Vec<(String, String)>>,
        refreshes: AtomicUsize,
    }

    impl MockAuthorization {
        /// Creates mock issuing `issued` on every successful exchange.
        pub fn new(should_succeed: bool, issued: CredentialToken) -> Self {
            Self {
                should_succeed,
                issued,
                refresh_delay: Duration::ZERO,
                exchanges: Mutex::new(Vec::new()),
                refreshes: AtomicUsize::new(0),
            }
        }

        /// Makes every refresh take `delay` before answering.
        pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
            self.refresh_delay = delay;
            self
        }

        /// Recorded `(code, redirect_uri)` pairs.
        pub fn exchanges(&self) -> Vec<(String, String)> {
            self.exchanges.lock().clone()
        }

        pub fn refresh_count(&self) -> usize {
            self.refreshes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthorizationPort for MockAuthorization {
        fn authorization_url(&self, redirect_uri: &str) -> Result<String, AuthError> {
            Ok(format!(
                "https://accounts.example.test/auth?access_type=offline&redirect_uri={redirect_uri}"
            ))
        }

        async fn exchange_code(
            &self,
            code: &str,
            redirect_uri: &str,
        ) -> Result<CredentialToken, AuthError> {
            self.exchanges
                .lock()
                .push((code.to_string(), redirect_uri.to_string()));
            if self.should_succeed {
                Ok(self.issued.clone())
            } else {
                Err(AuthError::exchange("invalid_grant"))
            }
        }

        async fn refresh(&self, _token: &CredentialToken) -> Result<CredentialToken, AuthError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.refresh_delay).await;
            if self.should_succeed {
                Ok(CredentialToken::new("ya29.refreshed-access-token")
                    .expiring_in(chrono::Utc::now(), 3600))
            } else {
                Err(AuthError::refresh("invalid_grant"))
            }
        }
    }
}
