//! Error types for the gate endpoints.

use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

/// A request rejected by the issue or redeem endpoint.
///
/// Every variant maps to a specific status and a stable `error` code in
/// the JSON body; the taxonomy stays discriminated end to end so tests
/// and operators can tell tampered, malformed, stale, and mismatched
/// requests apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Only read-only retrieval is permitted.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request named no embed id.
    #[error("missing embedId parameter")]
    MissingEmbedId,

    /// The embed id has no registration.
    #[error("unknown embedId")]
    UnknownEmbed,

    /// The request origin is absent or not in the embed's allowlist.
    #[error("origin not allowed: {origin:?}")]
    OriginNotAllowed { origin: Option<String> },

    /// The process has no signing secret.
    #[error("server not configured: {hint}")]
    NotConfigured { hint: &'static str },

    /// The presented token failed verification.
    #[error("invalid token: {detail}")]
    InvalidToken { detail: &'static str },

    /// The token's embed claim does not match the requested embed.
    #[error("token embed does not match request")]
    EmbedMismatch,

    /// The token's origin claim does not match the request origin.
    #[error("token origin does not match request")]
    OriginMismatch,

    /// The embed is registered but its content has been withdrawn.
    #[error("no content for embed")]
    NoContent,
}

impl ApiError {
    /// HTTP status for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingEmbedId => StatusCode::BAD_REQUEST,
            ApiError::UnknownEmbed | ApiError::NoContent => StatusCode::NOT_FOUND,
            ApiError::OriginNotAllowed { .. } => StatusCode::FORBIDDEN,
            ApiError::NotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidToken { .. } | ApiError::EmbedMismatch | ApiError::OriginMismatch => {
                StatusCode::UNAUTHORIZED
            }
        }
    }

    /// JSON body for this rejection.
    pub fn body(&self) -> Value {
        match self {
            ApiError::MethodNotAllowed => json!({"error": "method_not_allowed"}),
            ApiError::MissingEmbedId => json!({"error": "missing_embedId"}),
            ApiError::UnknownEmbed => json!({"error": "unknown_embedId"}),
            ApiError::OriginNotAllowed { origin } => {
                json!({"error": "origin_not_allowed", "origin": origin})
            }
            ApiError::NotConfigured { hint } => {
                json!({"error": "server_not_configured", "hint": hint})
            }
            ApiError::InvalidToken { detail } => json!({"error": "invalid_token", "detail": detail}),
            ApiError::EmbedMismatch => json!({"error": "embed_mismatch"}),
            ApiError::OriginMismatch => json!({"error": "origin_mismatch"}),
            ApiError::NoContent => json!({"error": "no_content"}),
        }
    }
}

/// Errors that can occur while running the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind or serve.
    #[error("failed to start embed gate: {0}")]
    StartupFailed(String),
}
