pub mod catalog;
pub mod check;
pub mod init;
pub mod optimize;
pub mod serve;
pub mod status;

use rigsmith_config::AppConfig;
use rigsmith_core::Catalog;

/// Load the config, then the catalog it points at.
pub(crate) fn load_catalog() -> Result<(AppConfig, Catalog), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog = open_catalog(&config)
        .map_err(|e| format!("{e} (set catalog.csv_dir or RIGSMITH_CSV_DIR)"))?;
    Ok((config, catalog))
}

fn open_catalog(config: &AppConfig) -> rigsmith_core::Result<Catalog> {
    Ok(rigsmith_catalog::load_dir(&config.catalog.csv_dir)?)
}
