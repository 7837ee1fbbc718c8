use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IdentitySecret;
use auth::StoredCredential;
use auth::TokenCodec;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use user_service::domain::project::errors::ProjectError;
use user_service::domain::project::errors::VerifierError;
use user_service::domain::project::models::NewProject;
use user_service::domain::project::models::Project;
use user_service::domain::project::models::ProjectId;
use user_service::domain::project::ports::CredentialVerifier;
use user_service::domain::project::ports::ProjectRepository;
use user_service::domain::project::service::ProjectService;
use user_service::domain::user::errors::UserError;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::User;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;

pub const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Account store kept in memory for router tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_credential_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredential>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|user| &user.email == email)
            .map(|user| StoredCredential {
                account_id: user.id.to_string(),
                password_hash: user.password_hash.clone(),
            }))
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

impl InMemoryProjectRepository {
    pub fn stored(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project, ProjectError> {
        let mut projects = self.projects.lock().unwrap();
        let project = project.into_project(ProjectId(projects.len() as i64 + 1));
        projects.push(project.clone());
        Ok(project)
    }
}

/// Answers from fixed lists instead of calling GitHub.
pub struct StubVerifier {
    pub valid_token: String,
    pub users: HashSet<String>,
    pub organizations: HashSet<String>,
    pub repositories: HashSet<String>,
}

impl Default for StubVerifier {
    fn default() -> Self {
        Self {
            valid_token: "ghp_valid".to_string(),
            users: HashSet::from(["octocat".to_string()]),
            organizations: HashSet::from(["acme".to_string()]),
            repositories: HashSet::from([
                "octocat/hello-world".to_string(),
                "acme/api".to_string(),
            ]),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StubVerifier {
    async fn token_is_valid(&self, access_token: &str) -> Result<bool, VerifierError> {
        Ok(access_token == self.valid_token)
    }

    async fn user_exists(&self, username: &str) -> Result<bool, VerifierError> {
        Ok(self.users.contains(username))
    }

    async fn organization_accessible(
        &self,
        access_token: &str,
        organization: &str,
    ) -> Result<bool, VerifierError> {
        Ok(access_token == self.valid_token && self.organizations.contains(organization))
    }

    async fn repository_accessible(
        &self,
        access_token: &str,
        owner: &str,
        repository: &str,
    ) -> Result<bool, VerifierError> {
        Ok(access_token == self.valid_token
            && self
                .repositories
                .contains(&format!("{}/{}", owner, repository)))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Router wired to in-memory adapters, driven with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub projects: Arc<InMemoryProjectRepository>,
    pub codec: TokenCodec,
}

impl TestApp {
    pub fn new() -> Self {
        let secret = IdentitySecret::new(SECRET).expect("Failed to create secret");
        let authenticator = Arc::new(Authenticator::new(&secret));

        let projects = Arc::new(InMemoryProjectRepository::default());
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&authenticator),
        ));
        let project_service = Arc::new(ProjectService::new(
            Arc::clone(&projects),
            Arc::new(StubVerifier::default()),
        ));

        Self {
            router: create_router(user_service, project_service, authenticator),
            projects,
            codec: TokenCodec::new(&secret),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> TestResponse {
        self.send(Method::POST, path, None, Some(body)).await
    }

    pub async fn get_authenticated(&self, path: &str, authorization: &str) -> TestResponse {
        self.send(Method::GET, path, Some(authorization), None).await
    }

    pub async fn post_authenticated(
        &self,
        path: &str,
        authorization: &str,
        body: serde_json::Value,
    ) -> TestResponse {
        self.send(Method::POST, path, Some(authorization), Some(body))
            .await
    }

    /// Register an account and return its id.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let username = email.split('@').next().unwrap_or("user").to_string();
        let response = self
            .post(
                "/users",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["user"]["id"]
            .as_str()
            .expect("Missing user id")
            .to_string()
    }

    /// Log in and return the issued token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post(
                "/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
