use thiserror::Error;

/// Error for project input validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectInputError {
    #[error("Invalid project type '{0}': expected 'personal' or 'org'")]
    InvalidProjectType(String),

    #[error("Invalid GitHub account name: {0}")]
    InvalidOwner(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepositoryName(String),

    #[error("At least one repository name is required")]
    NoRepositories,

    #[error("Access token must not be empty")]
    EmptyAccessToken,
}

/// Failure talking to the credential verifier itself (not a negative answer).
#[derive(Debug, Clone, Error)]
pub enum VerifierError {
    #[error("Verification request failed: {0}")]
    RequestFailed(String),
}

/// Top-level error for project operations
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error(transparent)]
    InvalidInput(#[from] ProjectInputError),

    #[error("Invalid GitHub PAT")]
    InvalidAccessToken,

    #[error("GitHub user not found")]
    UserNotFound,

    #[error("GitHub organization not found or no access")]
    OrganizationNotAccessible,

    #[error("No access to repository: {0}")]
    RepositoryNotAccessible(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
