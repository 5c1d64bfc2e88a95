//! Compatibility issues produced by the validator.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// A detected conflict between selected components.
///
/// Serialized as `{"components": [...], "issue": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    /// The participating categories (two or more).
    #[serde(rename = "components")]
    pub categories: Vec<Category>,

    /// Human-readable description quoting the conflicting values.
    #[serde(rename = "issue")]
    pub description: String,
}

impl CompatibilityIssue {
    pub fn between(first: Category, second: Category, description: impl Into<String>) -> Self {
        Self {
            categories: vec![first, second],
            description: description.into(),
        }
    }

    pub fn involves(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }
}
