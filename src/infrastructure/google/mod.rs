//! Google OAuth and YouTube Data API adapters.

mod dto;
mod http;
mod oauth_client;
mod youtube_client;

pub use oauth_client::{
    CHANNEL_MEMBERSHIPS_CREATOR_SCOPE, ClientCredentials, GoogleOAuthClient, SCOPES,
    YOUTUBE_READONLY_SCOPE,
};
pub use youtube_client::YouTubeClient;
