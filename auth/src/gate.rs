use thiserror::Error;

use crate::jwt::TokenError;

/// Conventional authorization scheme prefix. Case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was refused at the authentication gate.
///
/// `Display` is what the client sees: every token failure renders the same
/// message. The precise cause stays available through [`GateRejection::reason`]
/// for logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateRejection {
    #[error("Authorization header is missing")]
    MissingCredential,

    #[error("Invalid token")]
    Unauthorized(TokenError),
}

impl GateRejection {
    /// Underlying token failure, if any.
    pub fn reason(&self) -> Option<&TokenError> {
        match self {
            GateRejection::MissingCredential => None,
            GateRejection::Unauthorized(reason) => Some(reason),
        }
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// A leading `Bearer ` is stripped. A value without it is taken whole as the
/// token. Nothing else is split off, so a `Bearer ` occurring later in the
/// value stays part of the token and fails verification.
///
/// # Errors
/// * `MissingCredential` - Header absent, empty, or blank
/// * `Unauthorized(MalformedToken)` - Scheme present with nothing after it
pub fn extract_token(authorization: Option<&str>) -> Result<&str, GateRejection> {
    let value = authorization
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(GateRejection::MissingCredential)?;

    if value == BEARER_PREFIX.trim_end() {
        return Err(GateRejection::Unauthorized(TokenError::MalformedToken(
            "empty bearer token".to_string(),
        )));
    }

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim_start())
}
