use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed validity window of an issued token.
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Identity claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject, valid for [`TOKEN_VALIDITY_HOURS`] from `issued_at`.
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_VALIDITY_HOURS);

        Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    /// A token is expired at its expiry instant, not one second after.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_subject() {
        let issued_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = Claims::for_subject("user123", issued_at);

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "user123".to_string(),
            exp: 1000,
            iat: 0,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_serialized_field_names() {
        let claims = Claims {
            sub: "abc".to_string(),
            exp: 2,
            iat: 1,
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value, serde_json::json!({ "sub": "abc", "exp": 2, "iat": 1 }));
    }
}
