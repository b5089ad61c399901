//! Token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lower bound on token lifetime in seconds.
///
/// Applied even when the configured lifetime is smaller, so a
/// misconfigured TTL cannot produce a token that is already stale (or
/// never valid) at issuance.
pub const MIN_TTL_SECS: u64 = 10;

/// Claims carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedClaims {
    /// The embed this token grants access to.
    pub embed_id: String,

    /// The exact origin the token was issued to. Redemption from any
    /// other origin fails even if that origin is also allowlisted.
    pub origin: String,

    /// Expiry as epoch seconds. The token is invalid once the current
    /// time reaches this value.
    pub exp: i64,
}

impl EmbedClaims {
    /// Build claims expiring `ttl_secs` from now, subject to the
    /// [`MIN_TTL_SECS`] floor.
    pub fn new(embed_id: impl Into<String>, origin: impl Into<String>, ttl_secs: u64) -> Self {
        let ttl = effective_ttl(ttl_secs);
        Self::with_expiry(embed_id, origin, Utc::now().timestamp() + ttl as i64)
    }

    /// Build claims with an explicit expiry timestamp.
    pub fn with_expiry(embed_id: impl Into<String>, origin: impl Into<String>, exp: i64) -> Self {
        Self {
            embed_id: embed_id.into(),
            origin: origin.into(),
            exp,
        }
    }

    /// Whether the claims are expired at the given time.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// The lifetime actually applied for a requested TTL.
pub fn effective_ttl(ttl_secs: u64) -> u64 {
    ttl_secs.max(MIN_TTL_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let claims = EmbedClaims::with_expiry("E1", "https://a.example", 1234);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["embedId"], "E1");
        assert_eq!(value["origin"], "https://a.example");
        assert_eq!(value["exp"], 1234);
    }

    #[test]
    fn test_ttl_floor() {
        let now = Utc::now().timestamp();
        let claims = EmbedClaims::new("E1", "https://a.example", 0);
        assert!(claims.exp >= now + MIN_TTL_SECS as i64);
    }

    #[test]
    fn test_requested_ttl_above_floor_is_kept() {
        let now = Utc::now().timestamp();
        let claims = EmbedClaims::new("E1", "https://a.example", 90);
        // Allow a little clock slack between the two now() reads.
        assert!(claims.exp - now >= 90);
        assert!(claims.exp - now <= 92);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = EmbedClaims::with_expiry("E1", "https://a.example", 1000);
        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1000));
        assert!(claims.is_expired_at(1001));
    }
}
