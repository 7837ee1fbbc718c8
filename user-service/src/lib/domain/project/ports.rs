use async_trait::async_trait;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::errors::VerifierError;
use crate::domain::project::models::AddProjectCommand;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::user::models::UserId;

/// Port for project operations exposed to inbound adapters.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Validate the access token against the external host, then store the project.
    ///
    /// # Arguments
    /// * `user_id` - Authenticated owner of the project
    /// * `command` - Validated project fields
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Token rejected by the host
    /// * `UserNotFound` / `OrganizationNotAccessible` - Owner check failed
    /// * `RepositoryNotAccessible` - Token cannot read one of the repositories
    /// * `DatabaseError` - Database operation failed
    async fn add_project(
        &self,
        user_id: UserId,
        command: AddProjectCommand,
    ) -> Result<Project, ProjectError>;
}

/// Persistence operations for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Persist a project and return it with its assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, project: NewProject) -> Result<Project, ProjectError>;
}

/// Checks credentials and names against the repository host.
///
/// Each method answers `Ok(false)` for a negative answer and reserves `Err`
/// for failing to get an answer at all.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Whether the access token authenticates at all.
    async fn token_is_valid(&self, access_token: &str) -> Result<bool, VerifierError>;

    /// Whether a user account with this name exists.
    async fn user_exists(&self, username: &str) -> Result<bool, VerifierError>;

    /// Whether the organization exists and is visible to the token.
    async fn organization_accessible(
        &self,
        access_token: &str,
        organization: &str,
    ) -> Result<bool, VerifierError>;

    /// Whether the token can read `owner/repository`.
    async fn repository_accessible(
        &self,
        access_token: &str,
        owner: &str,
        repository: &str,
    ) -> Result<bool, VerifierError>;
}
