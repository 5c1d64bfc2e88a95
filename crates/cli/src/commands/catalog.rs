//! `rigsmith catalog` — Browse the component catalog.

use rigsmith_core::{Category, ComponentFilter};

pub async fn run(
    category: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, catalog) = super::load_catalog()?;

    let Some(name) = category else {
        println!("Catalog: {} components", catalog.component_count());
        for category in catalog.categories() {
            let count = catalog.components(category).map_or(0, |c| c.len());
            println!("  {:<22} {count:>6}", category.as_str());
        }
        return Ok(());
    };

    let category = Category::parse(name);
    if !catalog.contains(&category) {
        return Err(format!("Unknown component type '{name}'").into());
    }

    let filter = ComponentFilter::price_range(min_price, max_price);
    let components = catalog.filter(&category, &filter);
    println!("{category}: {} components", components.len());
    for component in components {
        println!("  ${:>9.2}  {}", component.price, component.name);
    }

    Ok(())
}
