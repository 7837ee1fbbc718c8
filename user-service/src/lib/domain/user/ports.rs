use async_trait::async_trait;
use auth::StoredCredential;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for account operations exposed to inbound adapters.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated fields.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify a login attempt and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (never distinguished)
    /// * `TokenGeneration` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, command: LoginCommand) -> Result<AccessToken, UserError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Fetch the account id and password hash registered for an email.
    ///
    /// # Returns
    /// `None` when no account uses this email
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_credential_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredential>, UserError>;
}
