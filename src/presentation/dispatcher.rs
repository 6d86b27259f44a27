//! Routes bus requests to application services.

use std::error::Error as StdError;
use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

use super::protocol::{DispatchError, ErrorPayload, Operation, Reply, Request};
use crate::application::dto::AuthStatus;
use crate::application::services::{MembershipService, SessionController, StateService};
use crate::application::use_cases::ExportRosterUseCase;
use crate::domain::errors::PlatformError;
use crate::domain::ports::BrowserPort;

/// Handles one request at a time; share it behind an `Arc` for concurrency.
pub struct Dispatcher {
    sessions: Arc<SessionController>,
    memberships: MembershipService,
    state: Arc<StateService>,
    export: ExportRosterUseCase,
    browser: Arc<dyn BrowserPort>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        sessions: Arc<SessionController>,
        memberships: MembershipService,
        state: Arc<StateService>,
        export: ExportRosterUseCase,
        browser: Arc<dyn BrowserPort>,
    ) -> Self {
        Self {
            sessions,
            memberships,
            state,
            export,
            browser,
        }
    }

    /// Executes `request`. Returns `None` for fire-and-forget operations.
    pub async fn dispatch(&self, request: Request) -> Option<Reply> {
        let Request { op, nonce, data } = request;
        debug!(%op, %nonce, "Dispatching");

        let payload = match op {
            Operation::IsAuthenticated => to_payload(&AuthStatus::new(self.sessions.is_authenticated())),
            Operation::Authenticate => self.authenticate().await,
            Operation::MembershipLevels => match self.memberships.membership_levels().await {
                Ok(levels) => to_payload(&levels),
                Err(e) => failure("Unable to get membership levels", &e),
            },
            Operation::Members => self.members(&data).await,
            Operation::Save => self.save(&data).await,
            Operation::StateRead => self.state.read_state(),
            Operation::StateWrite => {
                if let Err(e) = self.state.write_state(data).await {
                    error!(error = %e, "Failed to persist UI state");
                }
                return None;
            }
            Operation::OpenExternal => {
                if let Err(e) = self.open_external(&data) {
                    warn!(error = %e, "openExternal ignored");
                }
                return None;
            }
            Operation::SignOut => {
                if let Err(e) = self.sessions.sign_out().await {
                    error!(error = %e, "Failed to delete stored token");
                }
                json!({})
            }
        };

        Some(Reply { op, nonce, payload })
    }

    async fn authenticate(&self) -> Value {
        match self.sessions.authenticate().await {
            Ok(_) => to_payload(&AuthStatus::new(true)),
            Err(e) => {
                if !e.is_recoverable() {
                    error!(error = %e, "Sign-in failed; check the OAuth client configuration");
                }
                failure("Unable to authenticate with Google", &e)
            }
        }
    }

    async fn members(&self, data: &Value) -> Value {
        let level_id = match data.as_str().filter(|s| !s.is_empty()) {
            Some(id) => id,
            None => {
                let e = DispatchError::invalid(Operation::Members, "expected a level id string");
                return failure("Unable to get memberships", &e);
            }
        };

        match self.memberships.members(level_id).await {
            Ok(members) => to_payload(&members),
            Err(e) => failure("Unable to get memberships", &e),
        }
    }

    async fn save(&self, data: &Value) -> Value {
        let Some(contents) = data.as_str() else {
            let e = DispatchError::invalid(Operation::Save, "expected file contents as a string");
            return failure("Unable to save", &e);
        };

        match self.export.execute(contents).await {
            Ok(outcome) => to_payload(&outcome),
            Err(e) => {
                let summary = match &e {
                    PlatformError::Write { path, .. } => format!("Unable to save {}", path.display()),
                    _ => "Unable to save".to_string(),
                };
                failure(summary, &e)
            }
        }
    }

    fn open_external(&self, data: &Value) -> Result<(), DispatchError> {
        let raw = data
            .as_str()
            .ok_or_else(|| DispatchError::invalid(Operation::OpenExternal, "expected a URL string"))?;
        let url = Url::parse(raw)
            .map_err(|e| DispatchError::invalid(Operation::OpenExternal, e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DispatchError::invalid(
                Operation::OpenExternal,
                format!("refusing {} URL", url.scheme()),
            ));
        }

        self.browser
            .open(url.as_str())
            .map_err(|e| DispatchError::invalid(Operation::OpenExternal, e.to_string()))
    }
}

fn to_payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| failure("Unable to encode reply", &e))
}

fn failure(summary: impl Into<String>, err: &(dyn StdError + 'static)) -> Value {
    let payload = ErrorPayload::from_error(summary, err);
    warn!(error = %payload.error, message = %payload.message, "Request failed");
    payload.into_value()
}
