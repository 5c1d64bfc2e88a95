//! # Rigsmith Core
//!
//! Domain types, traits, and error definitions for the Rigsmith PC build
//! planner. This crate has **zero framework dependencies**; it defines the
//! domain model that the catalog loader, the build engine, the snapshot store
//! and the HTTP gateway all implement against.
//!
//! ## Design Philosophy
//!
//! Data lives here (categories, components, catalogs, builds, preferences,
//! compatibility issues). Every outward seam is a trait defined here with its
//! implementations in the respective crates:
//! - [`BuildStore`] — durable build snapshots (`rigsmith-store`)
//! - [`Answerer`] — the conversational collaborator (`rigsmith-chat`)

pub mod error;
pub mod category;
pub mod component;
pub mod catalog;
pub mod build;
pub mod preferences;
pub mod issue;
pub mod answer;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use category::Category;
pub use component::{AttributeValue, Component};
pub use catalog::{Catalog, ComponentFilter};
pub use build::{Build, BuildItem, BuildSummary};
pub use preferences::{Preferences, Usage};
pub use issue::CompatibilityIssue;
pub use answer::{Answer, Answerer};
pub use store::{BuildStore, Snapshot, SnapshotMeta};
