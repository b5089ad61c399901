//! # embedgate-token
//!
//! Signed access tokens for the embed gate.
//!
//! This crate provides functionality for:
//! - Minting short-lived tokens bound to an (embed id, origin) pair
//! - Verifying presented tokens and extracting their claims
//! - Discriminating verification failures (tampered, malformed, stale)
//!
//! ## Token model
//!
//! A token is two dot-separated segments: the base64url-encoded claims
//! JSON `{embedId, origin, exp}` and a base64url-encoded HMAC-SHA256 tag
//! computed over the encoded claims segment with the process secret.
//! Verification is a pure function of (token, secret, current time) —
//! nothing is stored server-side, so a token cannot be revoked before its
//! expiry.
//!
//! ## Why bind the origin into the claims?
//!
//! Checking the allowlist at issuance alone would let a token minted for
//! one origin be replayed from any other allowlisted origin. With the
//! origin inside the signed claims, the redemption request must present
//! the exact origin the token was issued to.

pub mod claims;
pub mod error;
pub mod token;

pub use claims::{EmbedClaims, MIN_TTL_SECS, effective_ttl};
pub use error::TokenError;
pub use token::{MintedToken, TokenSigner};
