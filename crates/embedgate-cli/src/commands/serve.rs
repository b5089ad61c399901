//! Serve command for starting the embed gate.
//!
//! `embedgate serve` - Start the HTTP gate from environment configuration.

use embedgate_core::GateConfig;
use embedgate_server::{AppState, GateServer, StaticContent};
use std::sync::Arc;

pub async fn run() -> anyhow::Result<()> {
    let config = GateConfig::from_env();
    let content = Arc::new(StaticContent::from_env());
    let state = AppState::new(config, content);

    GateServer::new(state).run().await?;
    Ok(())
}
