//! The Rigsmith build engine.
//!
//! Two stateless services over an immutable [`Catalog`](rigsmith_core::Catalog):
//!
//! - [`Optimizer`] — splits a total budget across categories and greedily
//!   picks the most expensive affordable part in each
//! - [`Validator`] — pairwise compatibility rules over a finished build
//!
//! [`BuildService`] bundles both for request handlers.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rigsmith_core::{Catalog, Category, Component, Preferences, Usage};
//! use rigsmith_engine::BuildService;
//!
//! let catalog = Catalog::new().with_category(
//!     Category::Cpu,
//!     vec![Component::new("Ryzen 5 7600", 199.0), Component::new("Ryzen 9 7950X", 549.0)],
//! );
//! let service = BuildService::new(Arc::new(catalog));
//! let result = service.optimize(1000.0, &Preferences::new(Usage::Gaming));
//! assert_eq!(result.build.get(&Category::Cpu).unwrap().name, "Ryzen 5 7600");
//! ```

mod allocation;
mod optimizer;
mod service;
mod validator;

pub use allocation::{Allocation, UNLISTED_SHARE};
pub use optimizer::Optimizer;
pub use service::{BuildService, OptimizedBuild};
pub use validator::{CompatibilityRule, PairRule, Validator};
