//! Authentication utilities library
//!
//! Provides the token authentication core used by the user service:
//! - Password hashing (Argon2id, fixed work factor)
//! - Signed, expiring access tokens (HS256 compact JWS)
//! - The request gate that turns an `Authorization` header into a verified identity
//!
//! Nothing here knows about HTTP frameworks or storage. The service adapts these
//! building blocks at its own boundaries.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{IdentitySecret, TokenCodec};
//!
//! let secret = IdentitySecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = TokenCodec::new(&secret);
//! let token = codec.issue("user123").unwrap();
//! assert_eq!(codec.verify_subject(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, IdentitySecret, StoredCredential};
//!
//! let secret = IdentitySecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let credential = StoredCredential {
//!     account_id: "user123".to_string(),
//!     password_hash: auth.hash_password("password123").unwrap(),
//! };
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", Some(&credential)).unwrap();
//!
//! // Protected request
//! let header = format!("Bearer {}", result.access_token);
//! let identity = auth.admit(Some(&header)).unwrap();
//! assert_eq!(identity.subject, "user123");
//! ```

pub mod authenticator;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::GateRejection;
pub use identity::StoredCredential;
pub use identity::VerifiedIdentity;
pub use jwt::Claims;
pub use jwt::ConfigurationError;
pub use jwt::IdentitySecret;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
