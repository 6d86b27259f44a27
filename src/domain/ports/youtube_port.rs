//! YouTube Data API port definition.

use async_trait::async_trait;

use crate::domain::entities::{Channel, Member, MembershipLevel, SessionHandle};
use crate::domain::errors::ApiError;

/// Read-only membership queries against the YouTube Data API.
///
/// Only the first result page is returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YouTubePort: Send + Sync {
    /// Returns the authenticated user's own channel.
    async fn channel(&self, session: &SessionHandle) -> Result<Channel, ApiError>;

    /// Returns the membership levels defined by the channel.
    async fn membership_levels(
        &self,
        session: &SessionHandle,
    ) -> Result<Vec<MembershipLevel>, ApiError>;

    /// Returns members with access to at least `level_id` (up to 1000).
    async fn members(
        &self,
        session: &SessionHandle,
        level_id: &str,
    ) -> Result<Vec<Member>, ApiError>;
}
