//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{AppSettings, CredentialToken, SessionHandle};
pub use errors::{ApiError, AuthError, PlatformError, StorageError};
pub use ports::{AuthorizationPort, TokenStoragePort, YouTubePort};
