use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::join_repository_list;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project, ProjectError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_projects (user_id, project_type, username, pat, repo_names, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(project.user_id.0)
        .bind(project.project_type.as_str())
        .bind(project.owner.as_str())
        .bind(&project.access_token)
        .bind(join_repository_list(&project.repositories))
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to insert project");
            ProjectError::DatabaseError(e.to_string())
        })?;

        Ok(project.into_project(ProjectId(id)))
    }
}
