//! Gate server.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;

/// The embed gate HTTP server.
pub struct GateServer {
    state: AppState,
}

impl GateServer {
    /// Create a server over the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind and serve until the process exits.
    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.state.config().server.bind_addr();
        tracing::info!(address = %addr, embeds = self.state.config().embeds.len(), "starting embed gate");

        let app = routes::create_router(self.state.clone());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::StartupFailed(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::StartupFailed(e.to_string()))?;

        Ok(())
    }
}
