//! Budget-constrained build optimizer.
//!
//! Greedy, per-category selection:
//!
//! 1. Start from the default category order (cpu first, cooler last).
//! 2. Move each category named in `preferences.priority` to the front, in
//!    the order given. The last-named category ends up first.
//! 3. Give every category a share of the total budget (see [`Allocation`]).
//! 4. In each category pick the most expensive component that fits its
//!    sub-budget. A category with nothing affordable, or missing from the
//!    catalog, is left out of the build.
//!
//! Unspent sub-budget is not carried over to later categories, so the build
//! total is usually below the requested budget.

use crate::allocation::Allocation;
use rigsmith_core::{Build, Catalog, Category, Component, Preferences};
use std::sync::Arc;
use tracing::debug;

/// Selects one component per category under a total budget.
pub struct Optimizer {
    catalog: Arc<Catalog>,
}

impl Optimizer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Evaluation order after applying the caller's priorities.
    ///
    /// Only the eight known categories take part; unknown names in the
    /// priority list are ignored.
    pub fn priority_order(preferences: &Preferences) -> Vec<Category> {
        let mut order = Category::KNOWN.to_vec();
        for category in &preferences.priority {
            if let Some(pos) = order.iter().position(|c| c == category) {
                let moved = order.remove(pos);
                order.insert(0, moved);
            }
        }
        order
    }

    /// The most expensive component priced at or below `sub_budget`.
    /// Ties keep the first such row in catalog order.
    pub fn select(components: &[Component], sub_budget: f64) -> Option<&Component> {
        components
            .iter()
            .filter(|c| c.price <= sub_budget)
            .fold(None, |best: Option<&Component>, candidate| match best {
                Some(current) if current.price >= candidate.price => Some(current),
                _ => Some(candidate),
            })
    }

    /// Produce a build for the given budget and preferences.
    ///
    /// Never fails: a zero, negative or non-finite budget yields an empty
    /// build, and categories without an affordable component are skipped.
    pub fn optimize(&self, total_budget: f64, preferences: &Preferences) -> Build {
        let mut build = Build::new();

        if !total_budget.is_finite() || total_budget <= 0.0 {
            debug!(total_budget, "Non-positive budget, returning empty build");
            return build;
        }

        let allocation = Allocation::for_usage(preferences.usage);

        for category in Self::priority_order(preferences) {
            let Some(components) = self.catalog.components(&category) else {
                debug!(category = %category, "Category not in catalog, skipping");
                continue;
            };

            let sub_budget = allocation.sub_budget(&category, total_budget);
            match Self::select(components, sub_budget) {
                Some(component) => {
                    debug!(
                        category = %category,
                        sub_budget,
                        selected = %component.name,
                        price = component.price,
                        "Selected component"
                    );
                    build.add_or_replace(category, component.clone());
                }
                None => {
                    debug!(category = %category, sub_budget, "Nothing affordable, skipping");
                }
            }
        }

        build
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigsmith_core::Usage;

    fn cpus(prices: &[f64]) -> Vec<Component> {
        prices
            .iter()
            .map(|p| Component::new(format!("CPU {p}"), *p))
            .collect()
    }

    fn optimizer(catalog: Catalog) -> Optimizer {
        Optimizer::new(Arc::new(catalog))
    }

    #[test]
    fn default_order_is_cpu_first_cooler_last() {
        let order = Optimizer::priority_order(&Preferences::default());
        assert_eq!(order.first(), Some(&Category::Cpu));
        assert_eq!(order.last(), Some(&Category::Cooler));
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn later_priorities_land_earlier() {
        let prefs = Preferences::new(Usage::General)
            .with_priority(Category::Storage)
            .with_priority(Category::Cooler);
        let order = Optimizer::priority_order(&prefs);
        assert_eq!(
            &order[..4],
            &[
                Category::Cooler,
                Category::Storage,
                Category::Cpu,
                Category::Motherboard
            ]
        );
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn unknown_priority_names_are_ignored() {
        let prefs = Preferences::new(Usage::General).with_priority(Category::Other("rgb".into()));
        assert_eq!(Optimizer::priority_order(&prefs), Category::KNOWN.to_vec());
    }

    #[test]
    fn selects_most_expensive_affordable() {
        let catalog = Catalog::new().with_category(Category::Cpu, cpus(&[80.0, 150.0, 220.0]));
        // 800 * 25% = 200: the 150 CPU fits, the 220 one does not.
        let build = optimizer(catalog).optimize(800.0, &Preferences::default());
        assert_eq!(build.get(&Category::Cpu).unwrap().price, 150.0);
    }

    #[test]
    fn price_equal_to_sub_budget_is_affordable() {
        let catalog = Catalog::new().with_category(Category::Cpu, cpus(&[150.0, 200.0]));
        let build = optimizer(catalog).optimize(800.0, &Preferences::default());
        assert_eq!(build.get(&Category::Cpu).unwrap().price, 200.0);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let components = vec![Component::new("First", 100.0), Component::new("Second", 100.0)];
        assert_eq!(Optimizer::select(&components, 100.0).unwrap().name, "First");
    }

    #[test]
    fn non_positive_budgets_yield_empty_builds() {
        let catalog = Catalog::new()
            .with_category(Category::Cpu, vec![Component::new("Free sample", 0.0)])
            .with_category(Category::Case, cpus(&[10.0]));
        let optimizer = optimizer(catalog);
        for budget in [0.0, -1.0, -5000.0, f64::NAN, f64::NEG_INFINITY] {
            let build = optimizer.optimize(budget, &Preferences::default());
            assert!(build.is_empty(), "budget {budget} produced a build");
            assert_eq!(build.total_price(), 0.0);
        }
    }

    #[test]
    fn empty_and_missing_categories_are_absent() {
        let catalog = Catalog::new()
            .with_category(Category::Cpu, cpus(&[100.0]))
            .with_category(Category::Memory, vec![]);
        let build = optimizer(catalog).optimize(1000.0, &Preferences::default());
        assert!(build.contains(&Category::Cpu));
        assert!(!build.contains(&Category::Memory));
        assert!(!build.contains(&Category::VideoCard));
        assert_eq!(build.len(), 1);
    }

    #[test]
    fn unaffordable_category_is_skipped() {
        let catalog = Catalog::new()
            .with_category(Category::Cpu, cpus(&[100.0]))
            .with_category(Category::Cooler, vec![Component::new("Tower", 90.0)]);
        // Cooler gets 2% of 1000 = 20.
        let build = optimizer(catalog).optimize(1000.0, &Preferences::default());
        assert!(build.contains(&Category::Cpu));
        assert!(!build.contains(&Category::Cooler));
    }

    #[test]
    fn gaming_and_general_pick_different_video_cards() {
        let cards = vec![
            Component::new("RX 7600", 235.0),
            Component::new("RTX 4060 Ti", 275.0),
        ];
        let optimizer = optimizer(Catalog::new().with_category(Category::VideoCard, cards));

        // 800 * 30% = 240, 800 * 35% = 280.
        let general = optimizer.optimize(800.0, &Preferences::new(Usage::General));
        let gaming = optimizer.optimize(800.0, &Preferences::new(Usage::Gaming));
        assert_eq!(general.get(&Category::VideoCard).unwrap().name, "RX 7600");
        assert_eq!(gaming.get(&Category::VideoCard).unwrap().name, "RTX 4060 Ti");
    }

    #[test]
    fn unspent_remainder_is_not_redistributed() {
        // The CPU leaves 150 of its 250 unspent; the video card still only
        // gets its own 300 and cannot reach the 400 card.
        let catalog = Catalog::new()
            .with_category(Category::Cpu, cpus(&[100.0]))
            .with_category(
                Category::VideoCard,
                vec![Component::new("Mid", 290.0), Component::new("High", 400.0)],
            );
        let build = optimizer(catalog).optimize(1000.0, &Preferences::default());
        assert_eq!(build.get(&Category::VideoCard).unwrap().name, "Mid");
        assert_eq!(build.total_price(), 390.0);
        assert!(build.total_price() < 1000.0);
    }

    #[test]
    fn unlisted_catalog_categories_are_not_selected() {
        let catalog = Catalog::new()
            .with_category(Category::Other("case-fan".into()), vec![Component::new("Fan", 5.0)]);
        let build = optimizer(catalog).optimize(1000.0, &Preferences::default());
        assert!(build.is_empty());
    }

    #[test]
    fn priority_does_not_change_independent_selections() {
        let catalog = Catalog::new()
            .with_category(Category::Cpu, cpus(&[80.0, 150.0, 220.0]))
            .with_category(Category::Storage, vec![Component::new("SSD", 70.0)]);
        let optimizer = optimizer(catalog);
        let plain = optimizer.optimize(800.0, &Preferences::default());
        let prioritized =
            optimizer.optimize(800.0, &Preferences::default().with_priority(Category::Storage));
        assert_eq!(plain, prioritized);
    }

    #[test]
    fn total_matches_selected_prices() {
        let catalog = Catalog::new()
            .with_category(Category::Cpu, cpus(&[180.0]))
            .with_category(Category::Motherboard, vec![Component::new("B650", 140.0)])
            .with_category(Category::Memory, vec![Component::new("32GB", 90.0)]);
        let build = optimizer(catalog).optimize(1000.0, &Preferences::default());
        let sum: f64 = build.iter().map(|(_, c)| c.price).sum();
        assert_eq!(build.total_price(), sum);
        assert_eq!(build.len(), 3);
    }
}
