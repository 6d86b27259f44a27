use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::CredentialToken;

/// Token endpoint success response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenResponse {
    /// Converts into a credential, anchoring `expires_in` at `issued_at`.
    #[must_use]
    pub fn into_credential(self, issued_at: DateTime<Utc>) -> CredentialToken {
        let mut token = CredentialToken::new(self.access_token);
        if let Some(token_type) = self.token_type {
            token = token.with_token_type(token_type);
        }
        if let Some(refresh_token) = self.refresh_token {
            token = token.with_refresh_token(refresh_token);
        }
        if let Some(scope) = self.scope {
            token = token.with_scope(scope);
        }
        if let Some(id_token) = self.id_token {
            token = token.with_id_token(id_token);
        }
        if let Some(expires_in) = self.expires_in {
            token = token.expiring_in(issued_at, expires_in);
        }
        token
    }
}

/// Token endpoint error response (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthErrorResponse {
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.error_description {
            Some(description) => format!("{}: {description}", self.error),
            None => self.error.clone(),
        }
    }
}

/// Paged list envelope shared by Data API list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Data API error envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}

impl ApiErrorBody {
    /// Message with the first machine-readable reason appended.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.errors.first().filter(|d| !d.reason.is_empty()) {
            Some(detail) => format!("{} ({})", self.message, detail.reason),
            None => self.message.clone(),
        }
    }
}
