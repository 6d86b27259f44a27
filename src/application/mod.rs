//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Session, handshake and query services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AuthStatus, SaveOutcome, TokenSource};
pub use services::{MembershipService, OAuthHandshake, SessionController, StateService};
pub use use_cases::{ExportRosterUseCase, RestoreSessionUseCase};
