use anyhow::Result;

use parley::core::AppConfig;
use parley::{server, setup_logging};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
    server::run(config).await
}
