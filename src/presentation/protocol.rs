//! Bus frames exchanged with the UI process.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Operations the UI can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "isAuthenticated")]
    IsAuthenticated,
    #[serde(rename = "authenticate")]
    Authenticate,
    #[serde(rename = "membershipLevels")]
    MembershipLevels,
    #[serde(rename = "members")]
    Members,
    #[serde(rename = "save")]
    Save,
    #[serde(rename = "state:read")]
    StateRead,
    #[serde(rename = "state:write")]
    StateWrite,
    #[serde(rename = "openExternal")]
    OpenExternal,
    #[serde(rename = "signout")]
    SignOut,
}

impl Operation {
    /// Whether the UI waits for a reply.
    #[must_use]
    pub const fn expects_reply(self) -> bool {
        !matches!(self, Self::StateWrite | Self::OpenExternal)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsAuthenticated => "isAuthenticated",
            Self::Authenticate => "authenticate",
            Self::MembershipLevels => "membershipLevels",
            Self::Members => "members",
            Self::Save => "save",
            Self::StateRead => "state:read",
            Self::StateWrite => "state:write",
            Self::OpenExternal => "openExternal",
            Self::SignOut => "signout",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-chosen correlation value. UIs send either a string or a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nonce {
    Text(String),
    Number(u64),
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Nonce {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// Inbound frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub op: Operation,
    pub nonce: Nonce,
    #[serde(default)]
    pub data: Value,
}

impl Request {
    #[must_use]
    pub fn new(op: Operation, nonce: impl Into<Nonce>, data: Value) -> Self {
        Self {
            op,
            nonce: nonce.into(),
            data,
        }
    }
}

/// Outbound frame, routed back by `nonce`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub op: Operation,
    pub nonce: Nonce,
    pub payload: Value,
}

impl Reply {
    /// Whether the payload is an [`ErrorPayload`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.payload
            .as_object()
            .is_some_and(|o| o.contains_key("error") && o.contains_key("message"))
    }
}

/// Error body handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Short human summary of what failed.
    pub error: String,
    /// Display of the underlying error.
    pub message: String,
    /// Source chain, outermost cause first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn from_error(summary: impl Into<String>, err: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            error: summary.into(),
            message: err.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\ncaused by: ")),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Request rejected before reaching a handler.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid data for {op}: {reason}")]
    InvalidPayload { op: Operation, reason: String },
}

impl DispatchError {
    pub fn invalid(op: Operation, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            op,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{AuthError, StorageError};
    use std::path::Path;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(r#"{"op":"isAuthenticated","nonce":"n1"}"#, Operation::IsAuthenticated ; "no data")]
    #[test_case(r#"{"op":"members","nonce":"n2","data":"level-1"}"#, Operation::Members ; "string data")]
    #[test_case(r#"{"op":"state:write","nonce":1700000000000,"data":{"a":1}}"#, Operation::StateWrite ; "numeric nonce")]
    fn test_parse_request(raw: &str, op: Operation) {
        let request: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(request.op, op);
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let parsed = serde_json::from_str::<Request>(r#"{"op":"shutdown","nonce":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_nonce_keeps_wire_type() {
        let reply = Reply {
            op: Operation::SignOut,
            nonce: Nonce::Number(42),
            payload: json!({}),
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"op": "signout", "nonce": 42, "payload": {}})
        );
    }

    #[test]
    fn test_fire_and_forget_operations() {
        assert!(!Operation::StateWrite.expects_reply());
        assert!(!Operation::OpenExternal.expects_reply());
        assert!(Operation::SignOut.expects_reply());
    }

    #[test]
    fn test_error_payload_carries_source_chain() {
        let err = AuthError::from(StorageError::io(
            Path::new("/data/.token.json"),
            std::io::Error::other("disk full"),
        ));

        let payload = ErrorPayload::from_error("Unable to authenticate with Google", &err);

        assert_eq!(payload.error, "Unable to authenticate with Google");
        assert!(payload.message.starts_with("credential storage error"));
        let stack = payload.stack.unwrap();
        assert!(stack.contains("/data/.token.json"));
        assert!(stack.contains("disk full"));
    }

    #[test]
    fn test_error_payload_without_source_has_no_stack() {
        let value = ErrorPayload::from_error("Unable to get memberships", &AuthError::NotAuthenticated)
            .into_value();

        assert_eq!(
            value,
            json!({"error": "Unable to get memberships", "message": "not authenticated"})
        );
    }
}
