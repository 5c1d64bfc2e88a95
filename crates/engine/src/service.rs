//! Build service: optimizer and validator over one shared catalog.
//!
//! Constructed once at startup and handed to request handlers by reference
//! (or `Arc`). It holds no per-request state: every call builds and returns
//! its own [`Build`].

use crate::optimizer::Optimizer;
use crate::validator::Validator;
use rigsmith_core::{Build, Catalog, CompatibilityIssue, Preferences};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result of one optimization request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedBuild {
    pub build: Build,
    pub compatibility_issues: Vec<CompatibilityIssue>,
    pub requested_budget: f64,
    /// Budget left over. Reported only; never reallocated.
    pub unspent: f64,
}

pub struct BuildService {
    catalog: Arc<Catalog>,
    optimizer: Optimizer,
    validator: Validator,
}

impl BuildService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_validator(catalog, Validator::new())
    }

    /// Use a custom rule set.
    pub fn with_validator(catalog: Arc<Catalog>, validator: Validator) -> Self {
        Self {
            optimizer: Optimizer::new(catalog.clone()),
            catalog,
            validator,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Optimize a build and check it in one step.
    pub fn optimize(&self, total_budget: f64, preferences: &Preferences) -> OptimizedBuild {
        let build = self.optimizer.optimize(total_budget, preferences);
        let compatibility_issues = self.validator.check(&build);
        let unspent = if total_budget.is_finite() {
            (total_budget - build.total_price()).max(0.0)
        } else {
            0.0
        };

        info!(
            budget = total_budget,
            usage = %preferences.usage,
            components = build.len(),
            total = build.total_price(),
            issues = compatibility_issues.len(),
            "Build optimized"
        );

        OptimizedBuild {
            build,
            compatibility_issues,
            requested_budget: total_budget,
            unspent,
        }
    }

    /// Check an externally assembled build.
    pub fn check(&self, build: &Build) -> Vec<CompatibilityIssue> {
        self.validator.check(build)
    }
}
