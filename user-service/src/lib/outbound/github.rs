use std::time::Duration;

use anyhow::Error;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use reqwest::StatusCode;

use crate::config::GithubConfig;
use crate::domain::project::errors::VerifierError;
use crate::domain::project::ports::CredentialVerifier;

/// `CredentialVerifier` backed by the GitHub REST API.
///
/// Every check is a single GET; only `200 OK` counts as a positive answer.
pub struct GithubCredentialVerifier {
    client: Client,
    api_url: String,
}

impl GithubCredentialVerifier {
    pub fn new(config: &GithubConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn probe(&self, path: &str, access_token: Option<&str>) -> Result<bool, VerifierError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = access_token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| VerifierError::RequestFailed(e.to_string()))?;

        let status = response.status();
        tracing::debug!(path, status = status.as_u16(), "GitHub probe answered");

        Ok(status == StatusCode::OK)
    }
}

#[async_trait]
impl CredentialVerifier for GithubCredentialVerifier {
    async fn token_is_valid(&self, access_token: &str) -> Result<bool, VerifierError> {
        self.probe("/user", Some(access_token)).await
    }

    async fn user_exists(&self, username: &str) -> Result<bool, VerifierError> {
        self.probe(&format!("/users/{}", username), None).await
    }

    async fn organization_accessible(
        &self,
        access_token: &str,
        organization: &str,
    ) -> Result<bool, VerifierError> {
        self.probe(&format!("/orgs/{}", organization), Some(access_token))
            .await
    }

    async fn repository_accessible(
        &self,
        access_token: &str,
        owner: &str,
        repository: &str,
    ) -> Result<bool, VerifierError> {
        self.probe(
            &format!("/repos/{}/{}", owner, repository),
            Some(access_token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(api_url: String) -> GithubCredentialVerifier {
        GithubCredentialVerifier::new(&GithubConfig {
            api_url,
            user_agent: "user-service-tests".to_string(),
            timeout_seconds: 5,
        })
        .expect("Failed to build verifier")
    }

    #[tokio::test]
    async fn test_token_is_valid_sends_token_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "token ghp_valid")
            .match_header("user-agent", "user-service-tests")
            .with_status(200)
            .with_body(r#"{"login":"octocat"}"#)
            .create_async()
            .await;

        let verifier = verifier(server.url());
        assert!(verifier.token_is_valid("ghp_valid").await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/user")
            .with_status(401)
            .create_async()
            .await;

        let verifier = verifier(server.url());
        assert!(!verifier.token_is_valid("ghp_revoked").await.unwrap());
    }

    #[tokio::test]
    async fn test_user_lookup_is_anonymous() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .create_async()
            .await;

        let verifier = verifier(format!("{}/", server.url()));
        assert!(verifier.user_exists("octocat").await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_organization_and_repository_paths() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/acme")
            .match_header("authorization", "token ghp_valid")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/api")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/private")
            .with_status(404)
            .create_async()
            .await;

        let verifier = verifier(server.url());
        assert!(verifier
            .organization_accessible("ghp_valid", "acme")
            .await
            .unwrap());
        assert!(verifier
            .repository_accessible("ghp_valid", "acme", "api")
            .await
            .unwrap());
        assert!(!verifier
            .repository_accessible("ghp_valid", "acme", "private")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let verifier = verifier("http://127.0.0.1:1".to_string());

        let result = verifier.token_is_valid("ghp_valid").await;
        assert!(matches!(result, Err(VerifierError::RequestFailed(_))));
    }
}
