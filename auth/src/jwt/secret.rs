use secrecy::ExposeSecret;
use secrecy::SecretString;

use super::errors::ConfigurationError;

/// Below this length HS256 keys are weaker than the digest they feed.
const RECOMMENDED_SECRET_BYTES: usize = 32;

/// Symmetric key material shared by every token signing and verification.
///
/// Loaded once at startup and never mutated. The `Debug` output is redacted.
#[derive(Debug)]
pub struct IdentitySecret(SecretString);

impl IdentitySecret {
    /// Wrap a configured secret.
    ///
    /// # Errors
    /// * `EmptySecret` - The value is empty or only whitespace
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::EmptySecret);
        }

        if secret.len() < RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                length = secret.len(),
                recommended = RECOMMENDED_SECRET_BYTES,
                "Token signing secret is shorter than recommended"
            );
        }

        Ok(Self(SecretString::from(secret)))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_secret() {
        assert_eq!(
            IdentitySecret::new("").unwrap_err(),
            ConfigurationError::EmptySecret
        );
        assert_eq!(
            IdentitySecret::new(" \t\n").unwrap_err(),
            ConfigurationError::EmptySecret
        );
    }

    #[test]
    fn test_accepts_secret() {
        let secret = IdentitySecret::new("my_secret_key_at_least_32_bytes_long!").unwrap();
        assert_eq!(secret.expose(), b"my_secret_key_at_least_32_bytes_long!");
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = IdentitySecret::new("do-not-print-me-anywhere-ever-please").unwrap();
        assert!(!format!("{:?}", secret).contains("do-not-print-me"));
    }
}
