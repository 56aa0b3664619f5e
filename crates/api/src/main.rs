//! Model Monitor - Main Entry Point

use monitor_api::{init_logging, run_server, ServiceSettings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServiceSettings::load()?;
    init_logging(&settings.logging)?;

    info!("=== Model Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Registry settings: {:?}", settings.registry);

    run_server(settings).await?;

    Ok(())
}
