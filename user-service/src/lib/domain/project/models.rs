use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::project::errors::ProjectInputError;
use crate::domain::user::models::UserId;

/// Set of external repositories a user registered along with an access token.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub project_type: ProjectType,
    pub owner: GithubName,
    pub access_token: String,
    pub repositories: Vec<GithubName>,
    pub created_at: DateTime<Utc>,
}

/// Project identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether the repositories belong to a user account or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Personal,
    Org,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Personal => "personal",
            ProjectType::Org => "org",
        }
    }
}

impl FromStr for ProjectType {
    type Err = ProjectInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(ProjectType::Personal),
            "org" => Ok(ProjectType::Org),
            other => Err(ProjectInputError::InvalidProjectType(other.to_string())),
        }
    }
}

/// Account, organization or repository name as accepted by GitHub.
///
/// Restricted to ASCII alphanumerics, `-`, `_` and `.` so it can be placed in
/// an API path without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubName(String);

impl GithubName {
    const MAX_LENGTH: usize = 100;

    fn parse(name: &str) -> Option<Self> {
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_LENGTH
            && name != "."
            && name != ".."
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        valid.then(|| Self(name.to_string()))
    }

    /// Validate an account or organization name.
    pub fn owner(name: &str) -> Result<Self, ProjectInputError> {
        Self::parse(name.trim()).ok_or_else(|| ProjectInputError::InvalidOwner(name.to_string()))
    }

    /// Validate a single repository name.
    pub fn repository(name: &str) -> Result<Self, ProjectInputError> {
        Self::parse(name).ok_or_else(|| ProjectInputError::InvalidRepositoryName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GithubName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Split a comma-separated repository list, trimming entries and dropping empty ones.
pub fn parse_repository_list(raw: &str) -> Result<Vec<GithubName>, ProjectInputError> {
    let repositories = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(GithubName::repository)
        .collect::<Result<Vec<_>, _>>()?;

    if repositories.is_empty() {
        return Err(ProjectInputError::NoRepositories);
    }

    Ok(repositories)
}

/// Comma-joined form used for storage.
pub fn join_repository_list(repositories: &[GithubName]) -> String {
    repositories
        .iter()
        .map(GithubName::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Command to register repositories under an access token.
#[derive(Debug)]
pub struct AddProjectCommand {
    pub project_type: ProjectType,
    pub owner: GithubName,
    pub access_token: String,
    pub repositories: Vec<GithubName>,
}

impl AddProjectCommand {
    /// Validate raw request fields.
    ///
    /// # Errors
    /// * `InvalidProjectType` - Type is neither `personal` nor `org`
    /// * `InvalidOwner` / `InvalidRepositoryName` - Name not acceptable to GitHub
    /// * `NoRepositories` - Repository list is empty
    /// * `EmptyAccessToken` - Token is blank
    pub fn parse(
        project_type: &str,
        owner: &str,
        access_token: String,
        repositories: &str,
    ) -> Result<Self, ProjectInputError> {
        let access_token = access_token.trim().to_string();
        if access_token.is_empty() {
            return Err(ProjectInputError::EmptyAccessToken);
        }

        Ok(Self {
            project_type: project_type.parse()?,
            owner: GithubName::owner(owner)?,
            access_token,
            repositories: parse_repository_list(repositories)?,
        })
    }
}

/// Project about to be persisted (no id yet).
#[derive(Debug, Clone)]
pub struct NewProject {
    pub user_id: UserId,
    pub project_type: ProjectType,
    pub owner: GithubName,
    pub access_token: String,
    pub repositories: Vec<GithubName>,
    pub created_at: DateTime<Utc>,
}

impl NewProject {
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            user_id: self.user_id,
            project_type: self.project_type,
            owner: self.owner,
            access_token: self.access_token,
            repositories: self.repositories,
            created_at: self.created_at,
        }
    }
}
