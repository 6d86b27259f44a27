//! YouTube Data API v3 client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ApiErrorResponse, ListResponse};
use super::http::{build_client, describe_transport_error};
use crate::domain::entities::{Channel, Member, MembershipLevel, SessionHandle};
use crate::domain::errors::ApiError;
use crate::domain::ports::YouTubePort;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const MEMBERS_PAGE_SIZE: &str = "1000";

/// YouTube Data API membership client.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
}

impl YouTubeClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(YOUTUBE_API_BASE)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = build_client()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        session: &SessionHandle,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}/{resource}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, session.authorization_header())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, resource, "Failed to reach YouTube API");
                ApiError::network(describe_transport_error(&e))
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let page: ListResponse<T> = response.json().await.map_err(|e| {
            warn!(error = %e, resource, "Failed to parse list response");
            ApiError::decode(e.to_string())
        })?;

        if page.next_page_token.is_some() {
            debug!(resource, "Further result pages exist and are not fetched");
        }

        Ok(page.items)
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(error) => error.error.describe(),
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { message },
            StatusCode::FORBIDDEN => ApiError::Forbidden { message },
            _ => ApiError::remote(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl YouTubePort for YouTubeClient {
    async fn channel(&self, session: &SessionHandle) -> Result<Channel, ApiError> {
        self.list::<Channel>(session, "channels", &[("part", "id"), ("mine", "true")])
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::ChannelNotFound)
    }

    async fn membership_levels(
        &self,
        session: &SessionHandle,
    ) -> Result<Vec<MembershipLevel>, ApiError> {
        let levels = self
            .list(session, "membershipsLevels", &[("part", "id,snippet")])
            .await?;
        debug!(count = levels.len(), "Fetched membership levels");
        Ok(levels)
    }

    async fn members(
        &self,
        session: &SessionHandle,
        level_id: &str,
    ) -> Result<Vec<Member>, ApiError> {
        let members = self
            .list(
                session,
                "members",
                &[
                    ("part", "snippet"),
                    ("maxResults", MEMBERS_PAGE_SIZE),
                    ("hasAccessToLevel", level_id),
                ],
            )
            .await?;
        debug!(count = members.len(), level_id, "Fetched members");
        Ok(members)
    }
}
