//! Use case implementations.

mod export_roster_use_case;
mod restore_session_use_case;

pub use export_roster_use_case::{DEFAULT_EXPORT_NAME, ExportRosterUseCase};
pub use restore_session_use_case::RestoreSessionUseCase;
