//! `rigsmith status` — Show configuration and catalog status.

use rigsmith_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("Rigsmith Status");
    println!("===============");
    println!("  Config dir:     {}", AppConfig::config_dir().display());
    println!("  Catalog dir:    {}", config.catalog.csv_dir.display());
    println!("  Gateway:        {}:{}", config.gateway.host, config.gateway.port);
    println!("  Origins:        {}", config.gateway.allowed_origins.join(", "));
    println!("  Chat budget:    ${:.0}", config.chat.default_budget);
    println!("  Chat model:     {}", config.chat.model);
    println!("  API key:        {}", if config.has_api_key() { "configured" } else { "not set" });
    println!("  Snapshots:      {} ({})", config.store.backend, config.store.resolved_snapshot_dir().display());

    match rigsmith_catalog::load_dir(&config.catalog.csv_dir) {
        Ok(catalog) => println!(
            "\n  ✅ Catalog loaded: {} categories, {} components",
            catalog.len(),
            catalog.component_count()
        ),
        Err(e) => println!("\n  ⚠️  Catalog unavailable: {e}"),
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — run `rigsmith init` first");
    }

    Ok(())
}
