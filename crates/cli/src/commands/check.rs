//! `rigsmith check` — Check a build file for compatibility issues.

use rigsmith_core::Build;
use rigsmith_engine::Validator;
use std::path::Path;

pub async fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let build: Build = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid build file {}: {e}", file.display()))?;

    let validator = Validator::new();
    let issues = validator.check(&build);

    println!("Checked {} components (total ${:.2})", build.len(), build.total_price());
    println!("  Rules: {}", validator.rule_names().join(", "));

    if issues.is_empty() {
        println!("  ✅ No compatibility issues");
        return Ok(());
    }

    for issue in &issues {
        println!("  ❌ {}", issue.description);
    }
    Err(format!("{} compatibility issue(s) found", issues.len()).into())
}
