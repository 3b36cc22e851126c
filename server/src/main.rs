use std::sync::Arc;

use todo_server::{config::ServerConfig, telemetry, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ServerConfig::from_env()?;
    let state = AppState::new(config.log_registry());
    telemetry::init(Arc::clone(&state.logs));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    todo_server::run(listener, state).await?;
    Ok(())
}
