use serde::{Deserialize, Serialize};

/// A branch of a linked GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubBranch {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepo {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<GitHubBranch>,
    /// Only populated when the source is fetched individually.
    #[serde(
        default,
        deserialize_with = "crate::model::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub branches: Vec<GitHubBranch>,
}

/// A repository integration that sessions can be started against.
///
/// `name` is the opaque resource id (e.g. `sources/github/owner/repo`) and is
/// what sessions reference in their source context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub github_repo: GitHubRepo,
}

impl Source {
    /// `owner/repo`, as shown in source pickers.
    pub fn display_title(&self) -> String {
        format!("{}/{}", self.github_repo.owner, self.github_repo.repo)
    }

    /// Branch names in server order.
    pub fn branch_names(&self) -> Vec<&str> {
        self.github_repo
            .branches
            .iter()
            .map(|branch| branch.display_name.as_str())
            .collect()
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.github_repo
            .default_branch
            .as_ref()
            .map(|branch| branch.display_name.as_str())
    }
}
