use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use allowance_ledger::config::{self, Config};
use allowance_ledger::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load()?;
    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state, &config.cors_origins);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
