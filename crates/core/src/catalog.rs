//! The component catalog, every purchasable part grouped by category.
//!
//! A catalog is assembled once at startup (see `rigsmith-catalog` for the CSV
//! loader) and then shared read-only, typically behind an `Arc`. Nothing in
//! the engine mutates it, so concurrent readers need no locking.

use crate::category::Category;
use crate::component::{AttributeValue, Component};
use std::collections::HashMap;

/// Mapping from category to an ordered sequence of components.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Category, Vec<Component>>,
    /// Categories in the order they were added.
    order: Vec<Category>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the table for a category.
    pub fn insert(&mut self, category: Category, components: Vec<Component>) {
        if !self.tables.contains_key(&category) {
            self.order.push(category.clone());
        }
        self.tables.insert(category, components);
    }

    /// Append components to a category's table, creating it if absent.
    pub fn extend(&mut self, category: Category, components: Vec<Component>) {
        match self.tables.get_mut(&category) {
            Some(table) => table.extend(components),
            None => self.insert(category, components),
        }
    }

    /// Builder-style variant of [`Catalog::insert`].
    pub fn with_category(mut self, category: Category, components: Vec<Component>) -> Self {
        self.insert(category, components);
        self
    }

    /// All categories, in load order.
    pub fn categories(&self) -> &[Category] {
        &self.order
    }

    /// The components of a category, or `None` if the catalog has no such table.
    pub fn components(&self, category: &Category) -> Option<&[Component]> {
        self.tables.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.tables.contains_key(category)
    }

    /// Find a component by name within a category (first match).
    pub fn find(&self, category: &Category, name: &str) -> Option<&Component> {
        self.components(category)?.iter().find(|c| c.name == name)
    }

    /// Components of a category matching a filter. Unknown categories yield
    /// an empty result.
    pub fn filter(&self, category: &Category, filter: &ComponentFilter) -> Vec<&Component> {
        self.components(category)
            .map(|components| components.iter().filter(|c| filter.matches(c)).collect())
            .unwrap_or_default()
    }

    /// Number of category tables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of components across all categories.
    pub fn component_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

/// Criteria for narrowing a category's components.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Attribute equality constraints. A component lacking the attribute
    /// does not match.
    pub attributes: Vec<(String, AttributeValue)>,
    /// Membership constraints: the attribute must equal one of the values.
    pub one_of: Vec<(String, Vec<AttributeValue>)>,
    /// Inclusive numeric bounds on an attribute. Non-numeric or missing
    /// values do not match.
    pub ranges: Vec<(String, Option<f64>, Option<f64>)>,
}

impl ComponentFilter {
    pub fn price_range(min_price: Option<f64>, max_price: Option<f64>) -> Self {
        Self {
            min_price,
            max_price,
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_one_of<V: Into<AttributeValue>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.one_of
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_range(mut self, key: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        self.ranges.push((key.into(), min, max));
        self
    }

    pub fn matches(&self, component: &Component) -> bool {
        if self.min_price.is_some_and(|min| component.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| component.price > max) {
            return false;
        }
        let equal = self
            .attributes
            .iter()
            .all(|(key, expected)| component.attribute(key).as_ref() == Some(expected));
        let member = self.one_of.iter().all(|(key, allowed)| {
            component
                .attribute(key)
                .is_some_and(|value| allowed.contains(&value))
        });
        let in_range = self.ranges.iter().all(|(key, min, max)| {
            component
                .attribute(key)
                .and_then(|value| value.as_f64())
                .is_some_and(|n| min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi))
        });
        equal && member && in_range
    }
}
