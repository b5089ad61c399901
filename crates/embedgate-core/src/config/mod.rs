//! Configuration for the embed gate.
//!
//! Everything is loaded once at process start from `EMBEDGATE_*`
//! environment variables and is immutable for the process lifetime.
//! Bad configuration never aborts startup: a malformed allowlist degrades
//! to an empty mapping (every embed then resolves as unknown) and a
//! missing secret is recorded as `None` and rejected per-request by the
//! endpoints that need it.
//!
//! # Environment variables
//!
//! - **EMBEDGATE_SECRET**: HMAC signing secret
//! - **EMBEDGATE_TOKEN_TTL**: token lifetime in seconds (default 90)
//! - **EMBEDGATE_EMBEDS**: JSON object mapping embed id to its array of
//!   permitted origins, e.g. `{"E1": ["https://a.example"]}`
//! - **EMBEDGATE_HOST** / **EMBEDGATE_PORT**: listen address

pub mod embeds;
pub mod server;

use std::collections::HashMap;

pub use server::ServerConfig;

/// Complete embed gate configuration.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// HMAC signing secret. `None` when absent or empty; endpoints that
    /// need it respond with a configuration error instead of signing
    /// with an empty key.
    pub secret: Option<String>,

    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: u64,

    /// Embed id -> permitted origins (exact scheme+host+port strings).
    pub embeds: HashMap<String, Vec<String>>,

    /// Listen address for the HTTP server.
    pub server: ServerConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl_secs: default_token_ttl(),
            embeds: HashMap::new(),
            server: ServerConfig::default(),
        }
    }
}

impl GateConfig {
    /// Create a configuration with the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Register an embed with its permitted origins.
    pub fn with_embed(mut self, embed_id: impl Into<String>, origins: Vec<String>) -> Self {
        self.embeds.insert(embed_id.into(), origins);
        self
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.token_ttl_secs = ttl_secs;
        self
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("EMBEDGATE_SECRET").ok(),
            std::env::var("EMBEDGATE_TOKEN_TTL").ok(),
            std::env::var("EMBEDGATE_EMBEDS").ok(),
            std::env::var("EMBEDGATE_HOST").ok(),
            std::env::var("EMBEDGATE_PORT").ok(),
        )
    }

    /// Build a configuration from raw environment values.
    fn from_values(
        secret: Option<String>,
        ttl: Option<String>,
        embeds: Option<String>,
        host: Option<String>,
        port: Option<String>,
    ) -> Self {
        let secret = secret
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if secret.is_none() {
            tracing::warn!("EMBEDGATE_SECRET is missing or empty; token endpoints will refuse requests");
        }

        let token_ttl_secs = match ttl {
            None => default_token_ttl(),
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "EMBEDGATE_TOKEN_TTL is not an integer; using default");
                default_token_ttl()
            }),
        };

        let embeds = embeds
            .map(|raw| embeds::parse_embed_map(&raw))
            .unwrap_or_default();

        Self {
            secret,
            token_ttl_secs,
            embeds,
            server: ServerConfig::from_values(host, port),
        }
    }

    /// Look up the permitted origins for an embed id.
    ///
    /// Returns `None` for unregistered ids and for registrations with an
    /// empty origin list (an embed must name at least one origin to be
    /// considered registered).
    pub fn allowed_origins_for(&self, embed_id: &str) -> Option<&[String]> {
        self.embeds
            .get(embed_id)
            .map(Vec::as_slice)
            .filter(|origins| !origins.is_empty())
    }
}

fn default_token_ttl() -> u64 {
    90
}
