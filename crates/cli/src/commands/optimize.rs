//! `rigsmith optimize` — Pick a build for a budget.

use rigsmith_core::{Category, Preferences, Usage};
use rigsmith_engine::{BuildService, OptimizedBuild};
use std::sync::Arc;

pub async fn run(
    budget: f64,
    usage: &str,
    priority: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !budget.is_finite() {
        return Err("budget must be a finite number".into());
    }

    let (_, catalog) = super::load_catalog()?;
    let service = BuildService::new(Arc::new(catalog));

    let preferences = Preferences {
        usage: Usage::from_hint(usage),
        priority: priority.iter().map(|p| Category::parse(p)).collect(),
    };
    let result = service.optimize(budget, &preferences);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, &preferences);
    }

    Ok(())
}

fn print_result(result: &OptimizedBuild, preferences: &Preferences) {
    println!(
        "Build for ${:.2} ({})",
        result.requested_budget, preferences.usage
    );
    println!("==========================");

    if result.build.is_empty() {
        println!("  Nothing in the catalog fits this budget.");
        return;
    }

    for (category, component) in result.build.iter() {
        println!("  {:<14} {:<40} ${:>9.2}", category.as_str(), component.name, component.price);
    }
    println!("  {:<14} {:<40} ${:>9.2}", "total", "", result.build.total_price());
    println!("  {:<14} {:<40} ${:>9.2}", "unspent", "", result.unspent);

    if result.compatibility_issues.is_empty() {
        println!("\n  No compatibility issues");
    } else {
        println!();
        for issue in &result.compatibility_issues {
            println!("  ⚠️  {}", issue.description);
        }
    }
}
