//! YouTube channel membership records.
//!
//! Field names follow the Data API v3 resources. Only the fields the crate
//! reads are typed; everything else rides along in `extra`, so a record
//! serializes back to exactly what the API returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user's own channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

/// A membership pricing tier (`membershipsLevel` resource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipLevel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<MembershipLevelSnippet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MembershipLevel {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.snippet
            .as_ref()
            .and_then(|s| s.level_details.as_ref())
            .and_then(|d| d.display_name.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipLevelSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_details: Option<LevelDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A channel member (`member` resource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<MemberSnippet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Member {
    fn details(&self) -> Option<&MemberDetails> {
        self.snippet.as_ref()?.member_details.as_ref()
    }

    #[must_use]
    pub fn channel_id(&self) -> &str {
        self.details()
            .and_then(|d| d.channel_id.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.details()
            .and_then(|d| d.display_name.as_deref())
            .unwrap_or_default()
    }

    /// Highest level this member can access, if reported.
    #[must_use]
    pub fn highest_level(&self) -> Option<&str> {
        self.snippet
            .as_ref()?
            .memberships_details
            .as_ref()?
            .highest_accessible_level
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_details: Option<MemberDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberships_details: Option<MembershipsDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Level bookkeeping for a member. Durations and `memberSince` timestamps
/// stay in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipsDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_accessible_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_levels: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
