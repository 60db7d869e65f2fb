//! Leasehold Server Binary

use anyhow::Result;
use leasehold_common_log::LogConfig;
use leasehold_server::{config::load_config, Server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;

    let log_config =
        LogConfig::new(&config.logging.level, &config.logging.format).with_env_overrides();
    leasehold_common_log::init(log_config)?;

    info!("Starting Leasehold Server v{}", env!("CARGO_PKG_VERSION"));

    let server = Server::new(config).await?;
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}
