use std::sync::OnceLock;

use crate::gate::extract_token;
use crate::gate::GateRejection;
use crate::identity::StoredCredential;
use crate::identity::VerifiedIdentity;
use crate::jwt::Claims;
use crate::jwt::IdentitySecret;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Verified against when the account does not exist, so both failure paths cost one hash.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token handling.
///
/// Holds only immutable key material; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    decoy_hash: OnceLock<String>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Account the token was issued to
    pub subject: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator bound to the process-wide secret.
    ///
    /// The decoy hash is computed here so the first unknown-account login costs
    /// the same as any other.
    pub fn new(secret: &IdentitySecret) -> Self {
        let authenticator = Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
            decoy_hash: OnceLock::new(),
        };
        authenticator.decoy();
        authenticator
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailure` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a login attempt and issue a token for the account.
    ///
    /// `credential` is `None` when no account matched the login identifier.
    /// That case is indistinguishable from a wrong password to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password mismatch
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        credential: Option<&StoredCredential>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(credential) = credential else {
            self.burn_decoy_verification(password);
            return Err(AuthenticationError::InvalidCredentials);
        };

        let is_valid = self
            .password_hasher
            .verify(password, &credential.password_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(&credential.account_id)?;

        Ok(AuthenticationResult {
            access_token,
            subject: credential.account_id.clone(),
        })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue(subject)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `MalformedToken`, `SignatureInvalid`, `TokenExpired`
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.verify(token)
    }

    /// Decide whether a request carrying `authorization` may proceed.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if present
    ///
    /// # Errors
    /// * `MissingCredential` - No usable header value
    /// * `Unauthorized` - Token failed verification for any reason
    pub fn admit(&self, authorization: Option<&str>) -> Result<VerifiedIdentity, GateRejection> {
        let token = extract_token(authorization)?;

        self.token_codec
            .verify(token)
            .map(|claims| VerifiedIdentity {
                subject: claims.sub,
            })
            .map_err(GateRejection::Unauthorized)
    }

    /// Cached decoy hash. A failed hash is never cached; the next call retries.
    fn decoy(&self) -> Option<&str> {
        if let Some(decoy) = self.decoy_hash.get() {
            return Some(decoy.as_str());
        }

        match self.password_hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(self.decoy_hash.get_or_init(|| hash).as_str()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to compute decoy password hash");
                None
            }
        }
    }

    fn burn_decoy_verification(&self, password: &str) {
        let Some(decoy) = self.decoy() else {
            return;
        };

        if let Err(e) = self.password_hasher.verify(password, decoy) {
            tracing::error!(error = %e, "Decoy password verification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(&IdentitySecret::new(SECRET).unwrap())
    }

    fn credential(authenticator: &Authenticator, password: &str) -> StoredCredential {
        StoredCredential {
            account_id: "user123".to_string(),
            password_hash: authenticator
                .hash_password(password)
                .expect("Failed to hash password"),
        }
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let credential = credential(&authenticator, "hunter2");

        let result = authenticator
            .authenticate("hunter2", Some(&credential))
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.subject, "user123");

        let decoded = authenticator
            .verify_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "user123");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let credential = credential(&authenticator, "hunter2");

        let result = authenticator.authenticate("wrong_password", Some(&credential));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unknown_account() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("hunter2", None);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));

        // The decoy hash is computed once and reused.
        let first = authenticator.decoy_hash.get().cloned();
        let _ = authenticator.authenticate("hunter2", None);
        assert!(first.is_some());
        assert_eq!(authenticator.decoy_hash.get().cloned(), first);
    }

    #[test]
    fn test_decoy_hash_ready_before_first_login() {
        let authenticator = authenticator();

        let decoy = authenticator
            .decoy_hash
            .get()
            .expect("Decoy hash not computed at construction");
        assert!(decoy.starts_with("$argon2id$"));
        assert_eq!(
            authenticator.password_hasher.verify(DECOY_PASSWORD, decoy),
            Ok(true)
        );
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = authenticator();
        let credential = StoredCredential {
            account_id: "user123".to_string(),
            password_hash: "not-a-phc-string".to_string(),
        };

        let result = authenticator.authenticate("hunter2", Some(&credential));
        assert!(matches!(
            result,
            Err(AuthenticationError::Password(PasswordError::MalformedHash(_)))
        ));
    }

    #[test]
    fn test_admit_bearer_token() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("user123").unwrap();

        let identity = authenticator
            .admit(Some(&format!("Bearer {}", token)))
            .expect("Token rejected");
        assert_eq!(identity.subject, "user123");
    }

    #[test]
    fn test_admit_without_bearer_prefix() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("user123").unwrap();

        assert_eq!(
            authenticator.admit(Some(&token)),
            authenticator.admit(Some(&format!("Bearer {}", token)))
        );
    }

    #[test]
    fn test_admit_missing_header() {
        assert_eq!(
            authenticator().admit(None),
            Err(GateRejection::MissingCredential)
        );
    }

    #[test]
    fn test_admit_expired_token() {
        let secret = IdentitySecret::new(SECRET).unwrap();
        let authenticator = Authenticator::new(&secret);
        let token = TokenCodec::new(&secret)
            .issue_at("user123", Utc::now() - Duration::hours(48))
            .unwrap();

        assert_eq!(
            authenticator.admit(Some(&format!("Bearer {}", token))),
            Err(GateRejection::Unauthorized(TokenError::TokenExpired))
        );
    }

    #[test]
    fn test_admit_foreign_token() {
        let foreign = Authenticator::new(
            &IdentitySecret::new("another_secret_key_of_32_bytes_or_more").unwrap(),
        );
        let token = foreign.issue_token("user123").unwrap();

        assert_eq!(
            authenticator().admit(Some(&format!("Bearer {}", token))),
            Err(GateRejection::Unauthorized(TokenError::SignatureInvalid))
        );
    }
}
