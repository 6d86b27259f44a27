//! OAuth credential token value object.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// OAuth2 credential issued by Google.
///
/// The persisted layout (`expiry_date` in epoch milliseconds) matches what the
/// googleapis client libraries write, so existing `.token.json` files load as-is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialToken {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    expiry_date: Option<DateTime<Utc>>,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

impl CredentialToken {
    /// Seconds before the real expiry at which the token is treated as stale.
    pub const EXPIRY_LEEWAY_SECS: i64 = 60;

    /// Creates a bearer token with no refresh token or expiry.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry_date: None,
            token_type: default_token_type(),
            scope: None,
            id_token: None,
        }
    }

    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry);
        self
    }

    /// Sets expiry relative to `issued_at`.
    #[must_use]
    pub fn expiring_in(self, issued_at: DateTime<Utc>, seconds: i64) -> Self {
        self.with_expiry(issued_at + Duration::seconds(seconds))
    }

    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    #[must_use]
    pub const fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Returns whether the access token is expired (or about to be) at `now`.
    ///
    /// Tokens without a known expiry are never considered expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date
            .is_some_and(|expiry| expiry - Duration::seconds(Self::EXPIRY_LEEWAY_SECS) <= now)
    }

    /// Returns whether a refresh can be attempted.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Combines this token with a freshly issued one.
    ///
    /// Google omits `refresh_token` from refresh responses, so the current one
    /// is carried over when the new token has none.
    #[must_use]
    pub fn refreshed_with(&self, mut issued: Self) -> Self {
        if issued.refresh_token.is_none() {
            issued.refresh_token.clone_from(&self.refresh_token);
        }
        if issued.scope.is_none() {
            issued.scope.clone_from(&self.scope);
        }
        issued
    }

    /// Returns masked access token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        mask(&self.access_token)
    }
}

fn mask(value: &str) -> String {
    if value.len() <= 10 || !value.is_ascii() {
        return "*".repeat(value.chars().count());
    }

    let visible_prefix = &value[..4];
    let visible_suffix = &value[value.len() - 4..];
    format!("{visible_prefix}...{visible_suffix}")
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialToken")
            .field("access_token", &self.masked())
            .field("refresh_token", &self.refresh_token.as_deref().map(mask))
            .field("expiry_date", &self.expiry_date)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
