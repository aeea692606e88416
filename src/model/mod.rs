//! Data model for the Jules API.
//!
//! All entities are server-owned. The client only holds refetchable copies.

mod activity;
mod session;
mod source;

pub use activity::{Activity, ActivityKind, PlanStep};
pub use session::{
    CreateSessionRequest, CreateSourceContext, GitHubRepoContext, SendMessageRequest, Session,
    SourceContext,
};
pub use source::{GitHubBranch, GitHubRepo, Source};

use serde::{Deserialize, Deserializer, Serialize};

/// `#[serde(default)]` that also covers an explicit `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /sources` response. Only the first page is ever read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesResponse {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// `GET /sessions` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub sessions: Vec<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// `GET /sessions/{id}/activities` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesResponse {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
