//! Google OAuth 2.0 endpoints for installed applications.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{OAuthErrorResponse, TokenResponse};
use super::http::{build_client, describe_transport_error};
use crate::domain::entities::CredentialToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthorizationPort;

const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Read-only access to YouTube account data.
pub const YOUTUBE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/youtube.readonly";
/// Access to the channel's membership levels and members.
pub const CHANNEL_MEMBERSHIPS_CREATOR_SCOPE: &str =
    "https://www.googleapis.com/auth/youtube.channel-memberships.creator";

/// Scopes requested on every sign-in.
pub const SCOPES: [&str; 2] = [YOUTUBE_READONLY_SCOPE, CHANNEL_MEMBERSHIPS_CREATOR_SCOPE];

/// OAuth client credentials.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Google authorization server client.
pub struct GoogleOAuthClient {
    client: Client,
    credentials: ClientCredentials,
    auth_endpoint: String,
    token_endpoint: String,
}

impl GoogleOAuthClient {
    /// Creates client against Google's production endpoints.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(credentials: ClientCredentials) -> Result<Self, AuthError> {
        Self::with_endpoints(credentials, GOOGLE_AUTH_ENDPOINT, GOOGLE_TOKEN_ENDPOINT)
    }

    /// Creates client with custom endpoints.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_endpoints(
        credentials: ClientCredentials,
        auth_endpoint: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let client = build_client()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            auth_endpoint: auth_endpoint.into(),
            token_endpoint: token_endpoint.into(),
        })
    }

    async fn post_token_request(
        &self,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, (Option<StatusCode>, String)> {
        let response = self
            .client
            .post(&self.token_endpoint)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach token endpoint");
                (None, describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<OAuthErrorResponse>().await {
                Ok(error) => error.describe(),
                Err(_) => format!("HTTP {status}"),
            };
            return Err((Some(status), message));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| (Some(status), format!("failed to parse token response: {e}")))
    }
}

#[async_trait]
impl AuthorizationPort for GoogleOAuthClient {
    fn authorization_url(&self, redirect_uri: &str) -> Result<String, AuthError> {
        let mut url = Url::parse(&self.auth_endpoint)
            .map_err(|e| AuthError::unexpected(format!("invalid authorization endpoint: {e}")))?;

        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("response_type", "code")
            .append_pair("client_id", self.credentials.client_id.as_str())
            .append_pair("redirect_uri", redirect_uri);

        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<CredentialToken, AuthError> {
        debug!(redirect_uri, "Exchanging authorization code");

        let response = self
            .post_token_request(&[
                ("code", code),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .await
            .map_err(|(status, message)| match status {
                None => AuthError::network(message),
                Some(_) => AuthError::exchange(message),
            })?;

        Ok(response.into_credential(Utc::now()))
    }

    async fn refresh(&self, token: &CredentialToken) -> Result<CredentialToken, AuthError> {
        let refresh_token = token
            .refresh_token()
            .ok_or_else(|| AuthError::refresh("no refresh token stored"))?;

        debug!("Refreshing access token");

        let response = self
            .post_token_request(&[
                ("refresh_token", refresh_token),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .await
            .map_err(|(status, message)| match status {
                None => AuthError::network(message),
                Some(_) => AuthError::refresh(message),
            })?;

        Ok(response.into_credential(Utc::now()))
    }
}
