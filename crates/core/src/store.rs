//! Build snapshot storage trait.
//!
//! A build may be persisted as an opaque snapshot and restored later. The
//! restored build recomputes its own total, so a snapshot can never carry a
//! stale price.

use crate::build::Build;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub build: Build,
}

/// Listing entry for a stored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub component_count: usize,
}

impl From<&Snapshot> for SnapshotMeta {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            created_at: snapshot.created_at,
            total_price: snapshot.build.total_price(),
            component_count: snapshot.build.len(),
        }
    }
}

/// The core BuildStore trait.
///
/// Implementations: file (JSON per snapshot), in-memory (for testing).
#[async_trait]
pub trait BuildStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Persist a build and return the new snapshot id.
    async fn save(&self, build: Build) -> std::result::Result<String, StoreError>;

    /// Load a snapshot by id.
    async fn load(&self, id: &str) -> std::result::Result<Option<Snapshot>, StoreError>;

    /// Delete a snapshot by id. Returns whether it existed.
    async fn delete(&self, id: &str) -> std::result::Result<bool, StoreError>;

    /// List stored snapshots, newest first.
    async fn list(&self) -> std::result::Result<Vec<SnapshotMeta>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::component::Component;

    #[test]
    fn snapshot_roundtrip_keeps_total_consistent() {
        let mut build = Build::new();
        build.add_or_replace(Category::Cpu, Component::new("A", 120.0));
        let snapshot = Snapshot {
            id: "snap_001".into(),
            created_at: Utc::now(),
            build,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let meta = SnapshotMeta::from(&parsed);
        assert_eq!(meta.total_price, 120.0);
        assert_eq!(meta.component_count, 1);
    }
}
