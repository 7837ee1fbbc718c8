/// Subject of a token that passed verification.
///
/// Produced by [`crate::Authenticator::admit`] and handed to downstream handlers
/// for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
}

/// Stored login material for one account, as returned by the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub account_id: String,
    pub password_hash: String,
}
