//! CSV component catalog ingestion.
//!
//! A catalog directory holds one CSV file per category; the file stem is the
//! category name (`cpu.csv`, `video-card.csv`, `internal-hard-drive.csv`).
//! Every file needs `name` and `price` columns. Other columns become
//! component attributes:
//!
//! - `socket` fills [`Component::socket`]
//! - `memory_type` (any table) or `type` (memory tables) fills
//!   [`Component::memory_type`]
//! - everything else lands in [`Component::attributes`], typed as
//!   bool / number / text
//!
//! Bad data degrades instead of failing the load: unreadable files and rows
//! without a usable price are skipped with a warning.

use rigsmith_core::error::CatalogError;
use rigsmith_core::{AttributeValue, Catalog, Category, Component};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Load every `*.csv` file in a directory into a catalog.
///
/// Files are read in name order so category order is stable across runs.
pub fn load_dir(dir: &Path) -> Result<Catalog, CatalogError> {
    if !dir.is_dir() {
        return Err(CatalogError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::ReadFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    let mut catalog = Catalog::new();
    let mut sources: Vec<(Category, PathBuf)> = Vec::new();
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let category = Category::parse(stem);

        match load_file(&category, &path) {
            Ok(components) => {
                info!(category = %category, count = components.len(), "Loaded catalog table");
                if let Some((_, first)) = sources.iter().find(|(c, _)| *c == category) {
                    warn!(
                        category = %category,
                        first = %first.display(),
                        path = %path.display(),
                        "Several files map to one category, appending rows"
                    );
                } else {
                    sources.push((category.clone(), path.clone()));
                }
                catalog.extend(category, components);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping catalog file");
            }
        }
    }

    info!(
        categories = catalog.len(),
        components = catalog.component_count(),
        "Catalog ready"
    );
    Ok(catalog)
}

/// Load one category table from a CSV file.
pub fn load_file(category: &Category, path: &Path) -> Result<Vec<Component>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_reader(category, file)
}

/// Load one category table from any CSV source.
pub fn load_reader<R: Read>(category: &Category, reader: R) -> Result<Vec<Component>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| CatalogError::ReadFailed {
            path: category.to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let name_idx = column("name").ok_or_else(|| CatalogError::MissingColumn {
        category: category.to_string(),
        column: "name".into(),
    })?;
    let price_idx = column("price").ok_or_else(|| CatalogError::MissingColumn {
        category: category.to_string(),
        column: "price".into(),
    })?;

    let mut components = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!(category = %category, line, error = %e, "Skipping malformed row");
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or_default();
        if name.is_empty() {
            debug!(category = %category, line, "Skipping row without a name");
            continue;
        }

        let price = match record.get(price_idx).map(str::parse::<f64>) {
            Some(Ok(p)) if p.is_finite() && p >= 0.0 => p,
            _ => {
                warn!(category = %category, component = name, "Skipping row without a usable price");
                continue;
            }
        };

        let mut component = Component::new(name, price);
        for (idx, value) in record.iter().enumerate() {
            if idx == name_idx || idx == price_idx || value.is_empty() {
                continue;
            }
            let Some(header) = headers.get(idx) else {
                continue;
            };
            assign_attribute(category, &mut component, header, value);
        }
        components.push(component);
    }

    Ok(components)
}

/// Route a cell to the typed field it belongs to, or to the residual map.
fn assign_attribute(category: &Category, component: &mut Component, header: &str, value: &str) {
    match header {
        "socket" => component.socket = Some(value.to_string()),
        "memory_type" => component.memory_type = Some(value.to_string()),
        "type" if *category == Category::Memory => component.memory_type = Some(value.to_string()),
        _ => {
            component
                .attributes
                .insert(header.to_string(), AttributeValue::infer(value));
        }
    }
}
