//! Domain entity definitions.

mod app_settings;
mod credential;
mod session;
mod youtube;

pub use app_settings::AppSettings;
pub use credential::CredentialToken;
pub use session::SessionHandle;
pub use youtube::{
    Channel, LevelDetails, Member, MemberDetails, MemberSnippet, MembershipLevel,
    MembershipLevelSnippet, MembershipsDetails,
};
