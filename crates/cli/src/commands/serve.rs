//! `rigsmith serve` — Start the HTTP API server.

use rigsmith_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Rigsmith API");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Catalog:   {}", config.catalog.csv_dir.display());
    println!("   Snapshots: {}", config.store.backend);

    rigsmith_gateway::start(config).await?;

    Ok(())
}
