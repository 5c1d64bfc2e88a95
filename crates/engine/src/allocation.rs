//! Budget allocation table.
//!
//! Shares are fractions of the total budget per category. Usage hints
//! override individual entries; categories the table does not name get a
//! flat [`UNLISTED_SHARE`].

use rigsmith_core::{Category, Usage};
use serde::Serialize;
use std::collections::BTreeMap;

/// Share given to any category the table does not list.
pub const UNLISTED_SHARE: f64 = 0.10;

/// Per-category budget shares for one optimization request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    shares: BTreeMap<Category, f64>,
}

impl Allocation {
    /// The default split.
    pub fn defaults() -> Self {
        let shares = BTreeMap::from([
            (Category::Cpu, 0.25),
            (Category::VideoCard, 0.30),
            (Category::Motherboard, 0.15),
            (Category::Memory, 0.10),
            (Category::Storage, 0.10),
            (Category::PowerSupply, 0.05),
            (Category::Case, 0.03),
            (Category::Cooler, 0.02),
        ]);
        Self { shares }
    }

    /// The split for a usage hint.
    ///
    /// Gaming: video-card 35%, cpu 20%.
    /// Workstation: cpu 30%, memory 15%, video-card 20%.
    /// General keeps the defaults.
    pub fn for_usage(usage: Usage) -> Self {
        let mut allocation = Self::defaults();
        match usage {
            Usage::Gaming => {
                allocation.set(Category::VideoCard, 0.35);
                allocation.set(Category::Cpu, 0.20);
            }
            Usage::Workstation => {
                allocation.set(Category::Cpu, 0.30);
                allocation.set(Category::Memory, 0.15);
                allocation.set(Category::VideoCard, 0.20);
            }
            Usage::General => {}
        }
        allocation
    }

    pub fn set(&mut self, category: Category, share: f64) {
        self.shares.insert(category, share);
    }

    /// Share of the total budget for a category.
    pub fn share(&self, category: &Category) -> f64 {
        self.shares.get(category).copied().unwrap_or(UNLISTED_SHARE)
    }

    /// Sub-budget for a category.
    pub fn sub_budget(&self, category: &Category, total_budget: f64) -> f64 {
        total_budget * self.share(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.shares.iter().map(|(c, s)| (c, *s))
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn default_shares_sum_to_one() {
        let total: f64 = Allocation::defaults().iter().map(|(_, s)| s).sum();
        assert!(approx(total, 1.0));
    }

    #[test]
    fn gaming_shifts_budget_to_video_card() {
        let gaming = Allocation::for_usage(Usage::Gaming);
        assert!(approx(gaming.share(&Category::VideoCard), 0.35));
        assert!(approx(gaming.share(&Category::Cpu), 0.20));
        assert!(approx(gaming.share(&Category::Memory), 0.10));
    }

    #[test]
    fn workstation_shifts_budget_to_cpu_and_memory() {
        let work = Allocation::for_usage(Usage::Workstation);
        assert!(approx(work.share(&Category::Cpu), 0.30));
        assert!(approx(work.share(&Category::Memory), 0.15));
        assert!(approx(work.share(&Category::VideoCard), 0.20));
        assert!(approx(work.share(&Category::Storage), 0.10));
    }

    #[test]
    fn general_matches_defaults() {
        assert_eq!(Allocation::for_usage(Usage::General), Allocation::defaults());
    }

    #[test]
    fn unlisted_categories_get_flat_share() {
        let allocation = Allocation::defaults();
        let fans = Category::Other("case-fan".into());
        assert!(approx(allocation.share(&fans), UNLISTED_SHARE));
        assert!(approx(allocation.sub_budget(&fans, 500.0), 50.0));
    }
}
