use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::errors::VerifierError;
use crate::domain::project::models::AddProjectCommand;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectType;
use crate::domain::project::ports::CredentialVerifier;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for project registration.
pub struct ProjectService<PR, CV>
where
    PR: ProjectRepository,
    CV: CredentialVerifier,
{
    repository: Arc<PR>,
    verifier: Arc<CV>,
}

impl<PR, CV> ProjectService<PR, CV>
where
    PR: ProjectRepository,
    CV: CredentialVerifier,
{
    pub fn new(repository: Arc<PR>, verifier: Arc<CV>) -> Self {
        Self {
            repository,
            verifier,
        }
    }
}

/// A verifier that could not answer counts as a refusal.
fn confirmed(check: &str, answer: Result<bool, VerifierError>) -> bool {
    match answer {
        Ok(confirmed) => confirmed,
        Err(e) => {
            tracing::warn!(check, error = %e, "Credential verification unavailable");
            false
        }
    }
}

#[async_trait]
impl<PR, CV> ProjectServicePort for ProjectService<PR, CV>
where
    PR: ProjectRepository,
    CV: CredentialVerifier,
{
    async fn add_project(
        &self,
        user_id: UserId,
        command: AddProjectCommand,
    ) -> Result<Project, ProjectError> {
        let token = command.access_token.as_str();
        let owner = command.owner.as_str();

        if !confirmed("token", self.verifier.token_is_valid(token).await) {
            return Err(ProjectError::InvalidAccessToken);
        }

        match command.project_type {
            ProjectType::Personal => {
                if !confirmed("user", self.verifier.user_exists(owner).await) {
                    return Err(ProjectError::UserNotFound);
                }
            }
            ProjectType::Org => {
                let answer = self.verifier.organization_accessible(token, owner).await;
                if !confirmed("organization", answer) {
                    return Err(ProjectError::OrganizationNotAccessible);
                }
            }
        }

        for repository in &command.repositories {
            let answer = self
                .verifier
                .repository_accessible(token, owner, repository.as_str())
                .await;
            if !confirmed("repository", answer) {
                return Err(ProjectError::RepositoryNotAccessible(
                    repository.to_string(),
                ));
            }
        }

        let project = self
            .repository
            .create(NewProject {
                user_id,
                project_type: command.project_type,
                owner: command.owner,
                access_token: command.access_token,
                repositories: command.repositories,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            project_id = %project.id,
            user_id = %project.user_id,
            repositories = project.repositories.len(),
            "Project added"
        );

        Ok(project)
    }
}
