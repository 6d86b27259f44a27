//! Membership queries over the current session.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::SessionController;
use crate::domain::entities::{Channel, Member, MembershipLevel};
use crate::domain::errors::ApiError;
use crate::domain::ports::YouTubePort;

/// Routes API reads through the session controller.
pub struct MembershipService {
    sessions: Arc<SessionController>,
    youtube: Arc<dyn YouTubePort>,
}

impl MembershipService {
    #[must_use]
    pub fn new(sessions: Arc<SessionController>, youtube: Arc<dyn YouTubePort>) -> Self {
        Self { sessions, youtube }
    }

    /// # Errors
    /// Returns `Auth(NotAuthenticated)` when signed out, or the API failure.
    pub async fn channel(&self) -> Result<Channel, ApiError> {
        let session = self.sessions.session().await?;
        self.youtube.channel(&session).await
    }

    /// # Errors
    /// Returns `Auth(NotAuthenticated)` when signed out, or the API failure.
    #[instrument(skip(self))]
    pub async fn membership_levels(&self) -> Result<Vec<MembershipLevel>, ApiError> {
        let session = self.sessions.session().await?;
        let levels = self.youtube.membership_levels(&session).await?;
        debug!(count = levels.len(), "Fetched membership levels");
        Ok(levels)
    }

    /// # Errors
    /// Returns `Auth(NotAuthenticated)` when signed out, or the API failure.
    #[instrument(skip(self))]
    pub async fn members(&self, level_id: &str) -> Result<Vec<Member>, ApiError> {
        let session = self.sessions.session().await?;
        let members = self.youtube.members(&session, level_id).await?;
        debug!(count = members.len(), "Fetched members");
        Ok(members)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::services::OAuthHandshake;
    use crate::application::services::handshake::tests::{issued_token, local_settings};
    use crate::domain::entities::CredentialToken;
    use crate::domain::errors::AuthError;
    use crate::domain::ports::mocks::{
        MockAuthorization, MockTokenStorage, MockYouTubePort, RecordingBrowser,
    };
    use serde_json::json;

    pub(crate) fn level(id: &str, name: &str) -> MembershipLevel {
        serde_json::from_value(json!({
            "id": id,
            "snippet": {"creatorChannelId": "UC_creator", "levelDetails": {"displayName": name}}
        }))
        .unwrap()
    }

    pub(crate) fn member(channel_id: &str, name: &str) -> Member {
        serde_json::from_value(json!({
            "snippet": {
                "creatorChannelId": "UC_creator",
                "memberDetails": {"channelId": channel_id, "displayName": name}
            }
        }))
        .unwrap()
    }

    pub(crate) fn signed_in_controller() -> Arc<SessionController> {
        let controller = signed_out_controller();
        controller.restore(CredentialToken::new("ya29.live"));
        controller
    }

    pub(crate) fn signed_out_controller() -> Arc<SessionController> {
        let authorization = Arc::new(MockAuthorization::new(true, issued_token()));
        let storage = Arc::new(MockTokenStorage::new());
        let handshake = OAuthHandshake::new(
            authorization.clone(),
            Arc::new(RecordingBrowser::new()),
            storage.clone(),
            local_settings(),
        );
        Arc::new(SessionController::new(handshake, authorization, storage))
    }

    #[tokio::test]
    async fn test_levels_use_current_session() {
        let mut youtube = MockYouTubePort::new();
        youtube
            .expect_membership_levels()
            .withf(|session| session.token().access_token() == "ya29.live")
            .times(2)
            .returning(|_| Ok(vec![level("l1", "Bronze"), level("l2", "Gold")]));
        let service = MembershipService::new(signed_in_controller(), Arc::new(youtube));

        let first = service.membership_levels().await.unwrap();
        let second = service.membership_levels().await.unwrap();

        let ids = |levels: &[MembershipLevel]| {
            levels.iter().map(|l| l.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), vec!["l1", "l2"]);
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_members_pass_level_through() {
        let mut youtube = MockYouTubePort::new();
        youtube
            .expect_members()
            .withf(|_, level_id| level_id == "l2")
            .times(1)
            .returning(|_, _| Ok(vec![member("UC_ada", "Ada")]));
        let service = MembershipService::new(signed_in_controller(), Arc::new(youtube));

        let members = service.members("l2").await.unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].display_name(), "Ada");
    }

    #[tokio::test]
    async fn test_signed_out_never_calls_api() {
        let mut youtube = MockYouTubePort::new();
        youtube.expect_channel().never();
        let service = MembershipService::new(signed_out_controller(), Arc::new(youtube));

        let err = service.channel().await.unwrap_err();

        assert!(matches!(err, ApiError::Auth(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_api_errors_propagate_unchanged() {
        let mut youtube = MockYouTubePort::new();
        youtube
            .expect_channel()
            .returning(|_| Err(ApiError::Forbidden {
                message: "insufficientPermissions".to_string(),
            }));
        let service = MembershipService::new(signed_in_controller(), Arc::new(youtube));

        let err = service.channel().await.unwrap_err();

        assert!(matches!(err, ApiError::Forbidden { .. }));
    }
}
