use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let password_hash = tokio::task::spawn_blocking(move || {
            authenticator.hash_password(&password)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing task failed");
            UserError::TaskFailed(e.to_string())
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            UserError::PasswordHashing(e.to_string())
        })?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<AccessToken, UserError> {
        let credential = match EmailAddress::new(command.email) {
            Ok(email) => self.repository.find_credential_by_email(&email).await?,
            Err(_) => None,
        };

        // Argon2 verification blocks for tens of milliseconds.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let (result, credential) = tokio::task::spawn_blocking(move || {
            let result = authenticator.authenticate(&password, credential.as_ref());
            (result, credential)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            UserError::TaskFailed(e.to_string())
        })?;

        match result {
            Ok(result) => {
                tracing::info!(user_id = %result.subject, "User authenticated");
                Ok(AccessToken(result.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(
                    account_found = credential.is_some(),
                    "Login rejected"
                );
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::Password(e)) => {
                tracing::error!(
                    error = %e,
                    user_id = credential.as_ref().map(|c| c.account_id.as_str()).unwrap_or_default(),
                    "Stored password hash is unusable"
                );
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::Token(e)) => {
                tracing::error!(error = %e, "Error generating token");
                Err(UserError::TokenGeneration(e.to_string()))
            }
        }
    }
}
