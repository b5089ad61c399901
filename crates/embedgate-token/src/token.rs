//! Token minting and verification.

use crate::claims::EmbedClaims;
use crate::error::TokenError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Mints and verifies embed access tokens with a shared secret.
///
/// The secret never leaves this process: anyone holding it can forge or
/// validate tags, so it is only ever used locally to compute HMACs.
#[derive(Debug)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

/// A freshly minted token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct MintedToken {
    /// The wire-format token string.
    pub token: String,
    /// The signed claims.
    pub claims: EmbedClaims,
}

/// Claims as decoded from the wire, before expiry validation.
///
/// `exp` stays a raw JSON value here so a missing or non-integer expiry
/// is reported as its own failure rather than a generic decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    embed_id: String,
    origin: String,
    #[serde(default)]
    exp: Option<serde_json::Value>,
}

impl TokenSigner {
    /// Create a signer. Fails if the secret is empty: operating with an
    /// empty key would make every tag forgeable.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self {
            secret: secret.to_vec(),
        })
    }

    /// Mint a token for an (embed id, origin) pair expiring `ttl_secs`
    /// from now (subject to the minimum-lifetime floor).
    pub fn mint(&self, embed_id: &str, origin: &str, ttl_secs: u64) -> MintedToken {
        let claims = EmbedClaims::new(embed_id, origin, ttl_secs);
        let token = self.mint_claims(&claims);
        MintedToken { token, claims }
    }

    /// Sign explicit claims.
    pub fn mint_claims(&self, claims: &EmbedClaims) -> String {
        let claims_json = serde_json::json!({
            "embedId": claims.embed_id,
            "origin": claims.origin,
            "exp": claims.exp,
        })
        .to_string();
        let encoded = URL_SAFE_NO_PAD.encode(claims_json);
        let tag = URL_SAFE_NO_PAD.encode(self.tag_for(encoded.as_bytes()));
        format!("{encoded}.{tag}")
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<EmbedClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit current time.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<EmbedClaims, TokenError> {
        let mut segments = token.split('.');
        let (encoded_claims, encoded_tag) = match (segments.next(), segments.next(), segments.next())
        {
            (Some(claims), Some(tag), None) if !claims.is_empty() && !tag.is_empty() => {
                (claims, tag)
            }
            _ => return Err(TokenError::Malformed),
        };

        let supplied_tag = URL_SAFE_NO_PAD
            .decode(encoded_tag)
            .map_err(|_| TokenError::Malformed)?;
        let expected_tag = self.tag_for(encoded_claims.as_bytes());
        if !tags_match(&expected_tag, &supplied_tag) {
            return Err(TokenError::SignatureMismatch);
        }

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(encoded_claims)
            .map_err(|e| TokenError::ClaimsDecode(e.to_string()))?;
        let raw: RawClaims = serde_json::from_slice(&claims_bytes)
            .map_err(|e| TokenError::ClaimsDecode(e.to_string()))?;

        let exp = raw
            .exp
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::InvalidExpiry)?;
        if exp <= now {
            return Err(TokenError::Expired { expired_at: exp });
        }

        Ok(EmbedClaims {
            embed_id: raw.embed_id,
            origin: raw.origin,
            exp,
        })
    }

    fn tag_for(&self, message: &[u8]) -> Vec<u8> {
        let mut mac =
            <Hmac<Sha256>>::new_from_slice(&self.secret).expect("HMAC key must be valid");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time tag comparison.
///
/// Length mismatch is the only early exit; equal-length inputs are
/// compared without a data-dependent branch so response timing cannot
/// leak how many tag bytes matched.
fn tags_match(expected: &[u8], supplied: &[u8]) -> bool {
    if expected.len() != supplied.len() {
        return false;
    }
    bool::from(expected.ct_eq(supplied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::MIN_TTL_SECS;

    const SECRET: &str = "unit-test-secret";
    const ORIGIN: &str = "https://a.example";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET).unwrap()
    }

    /// Sign an arbitrary payload the way mint_claims would.
    fn forge(signer: &TokenSigner, payload: &[u8]) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        let tag = URL_SAFE_NO_PAD.encode(signer.tag_for(encoded.as_bytes()));
        format!("{encoded}.{tag}")
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(TokenSigner::new("").unwrap_err(), TokenError::MissingSecret);
    }

    #[test]
    fn test_mint_then_verify_round_trip() {
        let signer = signer();
        let before = Utc::now().timestamp();
        let minted = signer.mint("E1", ORIGIN, 90);
        let after = Utc::now().timestamp();

        let claims = signer.verify(&minted.token).unwrap();
        assert_eq!(claims, minted.claims);
        assert_eq!(claims.embed_id, "E1");
        assert_eq!(claims.origin, ORIGIN);
        assert!(claims.exp >= before + 90);
        assert!(claims.exp <= after + 90);
    }

    #[test]
    fn test_mint_applies_ttl_floor() {
        let signer = signer();
        let now = Utc::now().timestamp();
        let minted = signer.mint("E1", ORIGIN, 1);
        assert!(minted.claims.exp >= now + MIN_TTL_SECS as i64);
    }

    #[test]
    fn test_wrong_segment_count_is_malformed() {
        let signer = signer();
        for token in ["", "justone", "a.b.c", ".tag", "claims."] {
            assert_eq!(
                signer.verify(token).unwrap_err(),
                TokenError::Malformed,
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_undecodable_tag_is_malformed() {
        let signer = signer();
        let minted = signer.mint("E1", ORIGIN, 90);
        let claims_segment = minted.token.split('.').next().unwrap();
        let token = format!("{claims_segment}.!!!not-base64url!!!");
        assert_eq!(signer.verify(&token).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_tampered_claims_segment_fails_signature() {
        let signer = signer();
        let minted = signer.mint("E1", ORIGIN, 90);
        let (claims_segment, tag_segment) = minted.token.split_once('.').unwrap();

        // Flip each claims byte to a different base64url character.
        for i in 0..claims_segment.len() {
            let mut bytes = claims_segment.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{}.{}", String::from_utf8(bytes).unwrap(), tag_segment);
            assert_eq!(
                signer.verify(&tampered).unwrap_err(),
                TokenError::SignatureMismatch,
                "claims byte {i}"
            );
        }
    }

    #[test]
    fn test_tampered_tag_fails_signature() {
        let signer = signer();
        let minted = signer.mint("E1", ORIGIN, 90);
        let (claims_segment, tag_segment) = minted.token.split_once('.').unwrap();
        let tag_bytes = URL_SAFE_NO_PAD.decode(tag_segment).unwrap();

        // Flip the low bit of each tag byte.
        for i in 0..tag_bytes.len() {
            let mut bytes = tag_bytes.clone();
            bytes[i] ^= 0x01;
            let tampered = format!("{}.{}", claims_segment, URL_SAFE_NO_PAD.encode(&bytes));
            assert_eq!(
                signer.verify(&tampered).unwrap_err(),
                TokenError::SignatureMismatch,
                "tag byte {i}"
            );
        }
    }

    #[test]
    fn test_truncated_tag_fails_signature() {
        let signer = signer();
        let minted = signer.mint("E1", ORIGIN, 90);
        let (claims_segment, tag_segment) = minted.token.split_once('.').unwrap();
        let tag_bytes = URL_SAFE_NO_PAD.decode(tag_segment).unwrap();

        let short = URL_SAFE_NO_PAD.encode(&tag_bytes[..tag_bytes.len() - 1]);
        let token = format!("{claims_segment}.{short}");
        assert_eq!(
            signer.verify(&token).unwrap_err(),
            TokenError::SignatureMismatch
        );
    }

    #[test]
    fn test_tag_from_other_claims_rejected() {
        let signer = signer();
        let first = signer.mint("E1", ORIGIN, 90);
        let second = signer.mint("E2", ORIGIN, 90);
        let claims_segment = first.token.split('.').next().unwrap();
        let other_tag = second.token.split('.').nth(1).unwrap();
        let spliced = format!("{claims_segment}.{other_tag}");
        assert_eq!(
            signer.verify(&spliced).unwrap_err(),
            TokenError::SignatureMismatch
        );
    }

    #[test]
    fn test_different_secret_rejected() {
        let minted = signer().mint("E1", ORIGIN, 90);
        let other = TokenSigner::new("a-different-secret").unwrap();
        assert_eq!(
            other.verify(&minted.token).unwrap_err(),
            TokenError::SignatureMismatch
        );
    }

    #[test]
    fn test_non_json_claims_decode_failure() {
        let signer = signer();
        let token = forge(&signer, b"definitely not json");
        assert!(matches!(
            signer.verify(&token).unwrap_err(),
            TokenError::ClaimsDecode(_)
        ));
    }

    #[test]
    fn test_missing_expiry_is_distinct() {
        let signer = signer();
        let token = forge(&signer, br#"{"embedId":"E1","origin":"https://a.example"}"#);
        assert_eq!(signer.verify(&token).unwrap_err(), TokenError::InvalidExpiry);
    }

    #[test]
    fn test_fractional_expiry_is_distinct() {
        let signer = signer();
        let token = forge(
            &signer,
            br#"{"embedId":"E1","origin":"https://a.example","exp":12.5}"#,
        );
        assert_eq!(signer.verify(&token).unwrap_err(), TokenError::InvalidExpiry);
    }

    #[test]
    fn test_expired_token_with_valid_signature() {
        let signer = signer();
        let claims = EmbedClaims::with_expiry("E1", ORIGIN, 1_000);
        let token = signer.mint_claims(&claims);

        assert_eq!(
            signer.verify_at(&token, 1_091).unwrap_err(),
            TokenError::Expired { expired_at: 1_000 }
        );
        // Expiry instant itself is already stale.
        assert_eq!(
            signer.verify_at(&token, 1_000).unwrap_err(),
            TokenError::Expired { expired_at: 1_000 }
        );
        // One second earlier it still verifies.
        assert_eq!(signer.verify_at(&token, 999).unwrap(), claims);
    }
}
