//! The build aggregate: at most one selected component per category.
//!
//! `total_price` is derived state. It is private, has no setter, and is
//! recomputed inside every mutating method, so a caller can never observe a
//! total that disagrees with the selected components. Deserialized builds
//! recompute it as well; any total present in the input is ignored.

use crate::category::Category;
use crate::component::{AttributeValue, Component};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A selection of components plus its derived total price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BuildRepr")]
pub struct Build {
    components: BTreeMap<Category, Component>,
    total_price: f64,
}

#[derive(Deserialize)]
struct BuildRepr {
    #[serde(default)]
    components: BTreeMap<Category, Component>,
}

impl TryFrom<BuildRepr> for Build {
    type Error = String;

    fn try_from(repr: BuildRepr) -> Result<Self, Self::Error> {
        let mut build = Self::new();
        for (category, component) in repr.components {
            if !component.price.is_finite() || component.price < 0.0 {
                return Err(format!(
                    "{category} '{}' has invalid price {}",
                    component.name, component.price
                ));
            }
            build.add_or_replace(category, component);
        }
        Ok(build)
    }
}

/// Snapshot of a build for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub components: BTreeMap<Category, Component>,
    pub total_price: f64,
    pub component_count: usize,
}

/// One selected component flattened for API responses:
/// `{"name", "type", "price", "specs"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildItem {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub price: f64,
    pub specs: BTreeMap<String, AttributeValue>,
}

impl BuildItem {
    pub fn new(category: &Category, component: &Component) -> Self {
        Self {
            name: component.name.clone(),
            category: category.clone(),
            price: component.price,
            specs: component.specs(),
        }
    }
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the selection for a category. Returns the component
    /// previously selected there, if any.
    ///
    /// A memory module's generation may arrive as a plain `type` attribute,
    /// the way memory tables name the column; it is moved into
    /// `memory_type` so the compatibility rules see it.
    pub fn add_or_replace(&mut self, category: Category, mut component: Component) -> Option<Component> {
        if category == Category::Memory && component.memory_type.is_none() {
            if let Some(AttributeValue::Text(memory_type)) = component.attributes.remove("type") {
                component.memory_type = Some(memory_type);
            }
        }
        let previous = self.components.insert(category, component);
        self.recompute_total();
        previous
    }

    /// Remove a category's selection. No-op if the category is not populated.
    pub fn remove(&mut self, category: &Category) -> Option<Component> {
        let removed = self.components.remove(category);
        self.recompute_total();
        removed
    }

    pub fn get(&self, category: &Category) -> Option<&Component> {
        self.components.get(category)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.components.contains_key(category)
    }

    /// Selected components keyed by category, in default priority order.
    pub fn components(&self) -> &BTreeMap<Category, Component> {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &Component)> {
        self.components.iter()
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Number of populated categories.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Selected components in category order, flattened for presentation.
    pub fn items(&self) -> Vec<BuildItem> {
        self.components
            .iter()
            .map(|(category, component)| BuildItem::new(category, component))
            .collect()
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            components: self.components.clone(),
            total_price: self.total_price,
            component_count: self.components.len(),
        }
    }

    fn recompute_total(&mut self) {
        self.total_price = self.components.values().map(|c| c.price).sum();
    }
}

impl From<Build> for BuildSummary {
    fn from(build: Build) -> Self {
        let component_count = build.components.len();
        Self {
            components: build.components,
            total_price: build.total_price,
            component_count,
        }
    }
}
