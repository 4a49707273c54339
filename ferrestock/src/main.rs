mod http;
mod server;

use anyhow::Result;
use tracing::info;

use ferrestock_core::{bootstrap::load_config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Ferrestock starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Connect, seed and serve
    server::run(&config).await
}
