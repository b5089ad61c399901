//! Shared application state.

use crate::content::ContentSource;
use embedgate_core::GateConfig;
use embedgate_token::TokenSigner;
use std::sync::Arc;

/// Shared state for the gate handlers.
///
/// Everything here is a read-only snapshot taken once at startup;
/// requests never coordinate, so there is nothing to lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The loaded configuration.
    config: GateConfig,
    /// Token signer, present only when a secret is configured.
    signer: Option<TokenSigner>,
    /// Content collaborator consulted after a redemption is authorized.
    content: Arc<dyn ContentSource>,
}

impl AppState {
    /// Create application state from a configuration snapshot and a
    /// content source.
    pub fn new(config: GateConfig, content: Arc<dyn ContentSource>) -> Self {
        let signer = config
            .secret
            .as_deref()
            .and_then(|secret| TokenSigner::new(secret).ok());
        if signer.is_none() {
            tracing::warn!("no signing secret configured; token endpoints will report server_not_configured");
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                signer,
                content,
            }),
        }
    }

    /// Get the configuration snapshot.
    pub fn config(&self) -> &GateConfig {
        &self.inner.config
    }

    /// Get the token signer if a secret is configured.
    pub fn signer(&self) -> Option<&TokenSigner> {
        self.inner.signer.as_ref()
    }

    /// Get the content source.
    pub fn content(&self) -> &dyn ContentSource {
        self.inner.content.as_ref()
    }
}
