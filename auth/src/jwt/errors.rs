use thiserror::Error;

/// Error type for token operations.
///
/// The variants are precise on purpose; callers facing untrusted clients
/// collapse them before responding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    TokenExpired,
}

/// Error raised while loading process-wide authentication settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Token signing secret is empty")]
    EmptySecret,
}
