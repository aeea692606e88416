use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub source: String,
}

/// A unit of work with the remote agent, scoped to one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub title: String,
    /// Free-text status label, e.g. `IN_PROGRESS`.
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<SourceContext>,
}

impl Session {
    /// Name of the source this session was started against, if known.
    pub fn source_name(&self) -> Option<&str> {
        self.source_context
            .as_ref()
            .map(|context| context.source.as_str())
    }

    /// Title for list rows: title, then prompt, then a placeholder.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.prompt.is_empty() {
            &self.prompt
        } else {
            "Untitled Session"
        }
    }

    /// Heading for the activity feed: title, then id.
    pub fn feed_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub prompt: String,
    pub source_context: CreateSourceContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceContext {
    pub source: String,
    pub github_repo_context: GitHubRepoContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepoContext {
    /// Omitted from the body when no branch was chosen.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub starting_branch: String,
}

impl CreateSessionRequest {
    pub fn new(
        source: impl Into<String>,
        branch: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            source_context: CreateSourceContext {
                source: source.into(),
                github_repo_context: GitHubRepoContext {
                    starting_branch: branch.into(),
                },
            },
        }
    }
}

/// Body of `POST /sessions/{id}:sendMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub prompt: String,
}
