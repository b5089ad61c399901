use embedgate_core::GateConfig;
use embedgate_server::{AppState, GateServer, StaticContent};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let config = GateConfig::from_env();
    let content = Arc::new(StaticContent::from_env());
    let state = AppState::new(config, content);

    GateServer::new(state).run().await?;

    Ok(())
}
