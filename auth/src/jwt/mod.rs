pub mod claims;
pub mod codec;
pub mod errors;
pub mod secret;

pub use claims::Claims;
pub use claims::TOKEN_VALIDITY_HOURS;
pub use codec::TokenCodec;
pub use errors::ConfigurationError;
pub use errors::TokenError;
pub use secret::IdentitySecret;
