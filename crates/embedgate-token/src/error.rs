//! Error types for token operations.

use thiserror::Error;

/// Errors that can occur when constructing a signer or verifying a token.
///
/// Each verification failure is a distinct variant so callers and logs
/// can discriminate tampered, malformed, and stale tokens instead of
/// collapsing them into one generic rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signing secret is missing or empty.
    #[error("signing secret is missing or empty")]
    MissingSecret,

    /// The token is not two non-empty dot-separated segments.
    #[error("token is malformed")]
    Malformed,

    /// The authentication tag does not match the claims segment.
    #[error("token signature does not match")]
    SignatureMismatch,

    /// The claims segment did not decode to valid claims JSON.
    #[error("token claims could not be decoded: {0}")]
    ClaimsDecode(String),

    /// The claims lack a well-formed integer expiry.
    #[error("token claims lack a well-formed expiry")]
    InvalidExpiry,

    /// The token expired at the given epoch-seconds timestamp.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: i64 },
}

impl TokenError {
    /// Stable symbolic code for HTTP bodies and log fields.
    pub fn reason_code(&self) -> &'static str {
        match self {
            TokenError::MissingSecret => "missing_secret",
            TokenError::Malformed => "malformed",
            TokenError::SignatureMismatch => "bad_signature",
            TokenError::ClaimsDecode(_) => "bad_claims",
            TokenError::InvalidExpiry => "bad_expiry",
            TokenError::Expired { .. } => "expired",
        }
    }
}
