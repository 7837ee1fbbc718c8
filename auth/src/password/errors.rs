use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Hash computation failed internally. Fatal for the current operation, never retried.
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    /// The stored hash is not a valid PHC string.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
