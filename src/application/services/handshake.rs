//! Authorization-code handshake with a loopback redirect.

use std::net::{IpAddr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::entities::CredentialToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthorizationPort, BrowserPort, TokenStoragePort};
use crate::infrastructure::loopback::LoopbackListener;

/// Phases of one handshake, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    /// Redirect listener bound, consent URL built.
    ListenerBound,
    /// Consent URL handed to the browser.
    AwaitingRedirect,
    /// Code received, talking to the token endpoint.
    ExchangingCode,
    /// Token issued.
    Authorized,
    /// Handshake ended without a token.
    Failed,
}

/// Handshake tuning.
#[derive(Debug, Clone)]
pub struct HandshakeSettings {
    /// Loopback address the redirect listener binds to.
    pub callback_host: IpAddr,
    /// Upper bound on waiting for the browser redirect.
    pub timeout: Duration,
}

impl Default for HandshakeSettings {
    fn default() -> Self {
        Self {
            callback_host: IpAddr::V6(Ipv6Addr::LOCALHOST),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Runs the installed-app authorization-code flow.
///
/// Each run binds a fresh ephemeral port, so the redirect URI differs per attempt.
pub struct OAuthHandshake {
    authorization: Arc<dyn AuthorizationPort>,
    browser: Arc<dyn BrowserPort>,
    storage: Arc<dyn TokenStoragePort>,
    settings: HandshakeSettings,
}

impl OAuthHandshake {
    #[must_use]
    pub fn new(
        authorization: Arc<dyn AuthorizationPort>,
        browser: Arc<dyn BrowserPort>,
        storage: Arc<dyn TokenStoragePort>,
        settings: HandshakeSettings,
    ) -> Self {
        Self {
            authorization,
            browser,
            storage,
            settings,
        }
    }

    /// Performs one handshake and persists the issued token.
    ///
    /// A failure to persist is logged; the token is still returned.
    ///
    /// # Errors
    /// Returns error if the listener cannot be bound, the browser cannot be
    /// launched, the redirect times out or reports an error, or the code exchange fails.
    pub async fn run(&self) -> Result<CredentialToken, AuthError> {
        let result = self.authorize().await;

        match &result {
            Ok(token) => {
                transition(HandshakePhase::Authorized);
                match self.storage.write_token(token).await {
                    Ok(()) => info!("Token persisted"),
                    Err(e) => error!(error = %e, "Failed to persist token"),
                }
            }
            Err(e) => {
                transition(HandshakePhase::Failed);
                warn!(error = %e, "Authorization handshake failed");
            }
        }

        result
    }

    async fn authorize(&self) -> Result<CredentialToken, AuthError> {
        let listener = LoopbackListener::bind(self.settings.callback_host).await?;
        let redirect_uri = listener.redirect_uri();
        let auth_url = self.authorization.authorization_url(&redirect_uri)?;
        transition(HandshakePhase::ListenerBound);

        self.browser
            .open(&auth_url)
            .map_err(|e| AuthError::browser(e.to_string()))?;
        transition(HandshakePhase::AwaitingRedirect);
        debug!(%redirect_uri, "Waiting for browser redirect");

        let code = tokio::time::timeout(self.settings.timeout, listener.wait_for_code())
            .await
            .map_err(|_| AuthError::Timeout {
                secs: self.settings.timeout.as_secs(),
            })??;

        transition(HandshakePhase::ExchangingCode);
        self.authorization.exchange_code(&code, &redirect_uri).await
    }
}

fn transition(phase: HandshakePhase) {
    debug!(?phase, "Handshake phase");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::errors::PlatformError;
    use crate::domain::ports::mocks::{MockAuthorization, MockTokenStorage, RecordingBrowser};
    use parking_lot::Mutex;
    use reqwest::Url;
    use std::net::Ipv4Addr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    /// Browser that "completes" consent by requesting the redirect URI with `query`.
    pub(crate) struct RedirectingBrowser {
        query: String,
        opened: Mutex<Vec<String>>,
    }

    impl RedirectingBrowser {
        pub(crate) fn new(query: impl Into<String>) -> Self {
            Self {
                query: query.into(),
                opened: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn opened(&self) -> Vec<String> {
            self.opened.lock().clone()
        }
    }

    impl BrowserPort for RedirectingBrowser {
        fn open(&self, url: &str) -> Result<(), PlatformError> {
            self.opened.lock().push(url.to_string());

            let redirect_uri = Url::parse(url)
                .ok()
                .and_then(|u| {
                    u.query_pairs()
                        .find(|(k, _)| k == "redirect_uri")
                        .map(|(_, v)| v.into_owned())
                })
                .ok_or_else(|| PlatformError::browser("no redirect_uri"))?;
            let authority = redirect_uri.trim_start_matches("http://").to_string();
            let query = self.query.clone();

            tokio::spawn(async move {
                let mut stream = TcpStream::connect(authority.as_str()).await.unwrap();
                let request = format!("GET /?{query} HTTP/1.1\r\nHost: {authority}\r\n\r\n");
                stream.write_all(request.as_bytes()).await.unwrap();
                let mut response = String::new();
                let _ = stream.read_to_string(&mut response).await;
            });
            Ok(())
        }
    }

    pub(crate) fn issued_token() -> CredentialToken {
        CredentialToken::new("ya29.issued-by-exchange")
            .with_refresh_token("1//refresh")
            .expiring_in(chrono::Utc::now(), 3599)
    }

    pub(crate) fn local_settings() -> HandshakeSettings {
        HandshakeSettings {
            callback_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_successful_handshake_persists_exchanged_token() {
        let issued = issued_token();
        let authorization = Arc::new(MockAuthorization::new(true, issued.clone()));
        let browser = Arc::new(RedirectingBrowser::new("code=4%2F0abc&scope=x"));
        let storage = Arc::new(MockTokenStorage::new());
        let handshake = OAuthHandshake::new(
            authorization.clone(),
            browser.clone(),
            storage.clone(),
            local_settings(),
        );

        let token = handshake.run().await.unwrap();

        assert_eq!(token, issued);
        assert_eq!(storage.stored().await, Some(issued));

        let exchanges = authorization.exchanges();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].0, "4/0abc");
        assert!(exchanges[0].1.starts_with("http://127.0.0.1:"));

        let opened = browser.opened();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains("access_type=offline"));
    }

    #[tokio::test]
    async fn test_each_attempt_uses_a_fresh_redirect_uri() {
        let authorization = Arc::new(MockAuthorization::new(true, issued_token()));
        let handshake = OAuthHandshake::new(
            authorization.clone(),
            Arc::new(RedirectingBrowser::new("code=abc")),
            Arc::new(MockTokenStorage::new()),
            local_settings(),
        );

        handshake.run().await.unwrap();
        handshake.run().await.unwrap();

        let exchanges = authorization.exchanges();
        assert_eq!(exchanges.len(), 2);
        assert_ne!(exchanges[0].1, exchanges[1].1);
    }

    #[tokio::test]
    async fn test_failed_exchange_persists_nothing() {
        let authorization = Arc::new(MockAuthorization::new(false, issued_token()));
        let storage = Arc::new(MockTokenStorage::new());
        let handshake = OAuthHandshake::new(
            authorization,
            Arc::new(RedirectingBrowser::new("code=bad")),
            storage.clone(),
            local_settings(),
        );

        let err = handshake.run().await.unwrap_err();

        assert!(matches!(err, AuthError::CodeExchangeFailed { .. }));
        assert!(storage.stored().await.is_none());
    }

    #[tokio::test]
    async fn test_denied_consent_fails_handshake() {
        let authorization = Arc::new(MockAuthorization::new(true, issued_token()));
        let handshake = OAuthHandshake::new(
            authorization.clone(),
            Arc::new(RedirectingBrowser::new("error=access_denied")),
            Arc::new(MockTokenStorage::new()),
            local_settings(),
        );

        let err = handshake.run().await.unwrap_err();

        assert!(matches!(err, AuthError::AuthorizationDenied { .. }));
        assert!(authorization.exchanges().is_empty());
    }

    #[tokio::test]
    async fn test_times_out_without_redirect() {
        let handshake = OAuthHandshake::new(
            Arc::new(MockAuthorization::new(true, issued_token())),
            Arc::new(RecordingBrowser::new()),
            Arc::new(MockTokenStorage::new()),
            HandshakeSettings {
                timeout: Duration::from_millis(50),
                ..local_settings()
            },
        );

        let err = handshake.run().await.unwrap_err();

        assert!(matches!(err, AuthError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_storage_failure_still_returns_token() {
        let storage = Arc::new(MockTokenStorage::new());
        storage.fail_writes();
        let handshake = OAuthHandshake::new(
            Arc::new(MockAuthorization::new(true, issued_token())),
            Arc::new(RedirectingBrowser::new("code=abc")),
            storage.clone(),
            local_settings(),
        );

        let token = handshake.run().await.unwrap();

        assert_eq!(token.access_token(), "ya29.issued-by-exchange");
        assert!(storage.stored().await.is_none());
    }
}
