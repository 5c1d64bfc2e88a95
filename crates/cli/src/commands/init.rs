//! `rigsmith init` — Write the default configuration.

use rigsmith_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("Rigsmith — Setup");
    println!("================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file exists, leaving it untouched: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Wrote default config: {}", config_path.display());
    }

    let snapshot_dir = AppConfig::default().store.resolved_snapshot_dir();
    if !snapshot_dir.exists() {
        std::fs::create_dir_all(&snapshot_dir)?;
        println!("Created snapshot directory: {}", snapshot_dir.display());
    }

    println!("\nNext steps:");
    println!("  1. Point catalog.csv_dir at your component CSV files");
    println!("  2. rigsmith optimize --budget 1200 --usage gaming");
    println!("  3. rigsmith serve");

    Ok(())
}
