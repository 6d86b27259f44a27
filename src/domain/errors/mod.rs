//! Domain error types.

mod api_error;
mod auth_error;
mod platform_error;
mod storage_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use platform_error::PlatformError;
pub use storage_error::StorageError;
