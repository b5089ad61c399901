//! Content source boundary.
//!
//! Content resolution lives outside the gate: once a redemption is
//! authorized, the broker makes a single async call here and passes the
//! payload through unmodified. No retry or backpressure at this layer.

use async_trait::async_trait;
use embedgate_core::ContentPayload;
use std::collections::HashMap;

/// Resolves an embed id to its content payload.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the payload for an embed, or `None` if the content has been
    /// withdrawn. Withdrawal is independent of access rights: a valid
    /// token against absent content is a not-found outcome, not an
    /// authorization failure.
    async fn fetch(&self, embed_id: &str) -> Option<ContentPayload>;
}

/// In-memory content source.
///
/// Serves as the process-local collaborator for deployments that inline
/// their content, and as the test double.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    entries: HashMap<String, ContentPayload>,
}

impl StaticContent {
    /// Create an empty content source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content for an embed.
    pub fn with(mut self, embed_id: impl Into<String>, payload: ContentPayload) -> Self {
        self.entries.insert(embed_id.into(), payload);
        self
    }

    /// Load from the `EMBEDGATE_CONTENT` environment variable: a JSON
    /// object mapping embed id to a tagged payload. Malformed input
    /// degrades to an empty source, like the embed allowlist.
    pub fn from_env() -> Self {
        match std::env::var("EMBEDGATE_CONTENT") {
            Ok(raw) => Self::from_json(&raw),
            Err(_) => Self::new(),
        }
    }

    /// Parse a JSON content map, degrading to empty on malformed input.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<HashMap<String, ContentPayload>>(raw) {
            Ok(entries) => Self { entries },
            Err(err) => {
                tracing::warn!(error = %err, "EMBEDGATE_CONTENT is not a valid content map; treating as empty");
                Self::new()
            }
        }
    }
}

#[async_trait]
impl ContentSource for StaticContent {
    async fn fetch(&self, embed_id: &str) -> Option<ContentPayload> {
        self.entries.get(embed_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_registered_content() {
        let source = StaticContent::new().with(
            "E1",
            ContentPayload::Html {
                html: "<b>hi</b>".into(),
            },
        );
        assert!(source.fetch("E1").await.is_some());
        assert!(source.fetch("E2").await.is_none());
    }

    #[test]
    fn test_from_json() {
        let source =
            StaticContent::from_json(r#"{"E1": {"kind": "url", "url": "https://m.example/v"}}"#);
        assert_eq!(source.entries.len(), 1);
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        assert!(StaticContent::from_json("{oops").entries.is_empty());
    }
}
