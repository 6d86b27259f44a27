//! Data transfer objects for the application layer.

mod export_dto;
mod session_dto;

pub use export_dto::SaveOutcome;
pub use session_dto::{AuthStatus, TokenSource};
