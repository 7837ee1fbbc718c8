use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::AddProjectCommand;
use crate::domain::project::ports::ProjectServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_project(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<AddProjectRequest>, JsonRejection>,
) -> Result<ApiSuccess<AddProjectResponseData>, ApiError> {
    let Json(body) = body?;

    let command = AddProjectCommand::parse(
        &body.project_type,
        &body.username,
        body.pat,
        &body.repo_names,
    )
    .map_err(ProjectError::from)?;

    state
        .project_service
        .add_project(user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|project| {
            ApiSuccess::new(
                StatusCode::CREATED,
                AddProjectResponseData {
                    message: "Project added successfully".to_string(),
                    project_id: project.id.0,
                },
            )
        })
}

/// `repo_names` is a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddProjectRequest {
    project_type: String,
    username: String,
    pat: String,
    repo_names: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddProjectResponseData {
    pub message: String,
    pub project_id: i64,
}
