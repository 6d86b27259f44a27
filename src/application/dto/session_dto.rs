//! Session DTOs.

use serde::Serialize;

/// Where the current session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token file from a previous run.
    Stored,
    /// Fresh browser sign-in.
    Handshake,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Stored => "stored token",
            Self::Handshake => "browser sign-in",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Reply body for authentication queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
}

impl AuthStatus {
    #[must_use]
    pub const fn new(is_authenticated: bool) -> Self {
        Self { is_authenticated }
    }
}
