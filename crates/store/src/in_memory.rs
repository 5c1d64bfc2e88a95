//! In-memory backend for tests and ephemeral deployments.

use async_trait::async_trait;
use chrono::Utc;
use rigsmith_core::error::StoreError;
use rigsmith_core::{Build, BuildStore, Snapshot, SnapshotMeta};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A store that keeps snapshots in a Vec.
/// Useful for testing and servers where persistence isn't needed.
pub struct InMemoryBuildStore {
    snapshots: Arc<RwLock<Vec<Snapshot>>>,
}

impl InMemoryBuildStore {
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryBuildStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildStore for InMemoryBuildStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn save(&self, build: Build) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.snapshots.write().await.push(Snapshot {
            id: id.clone(),
            created_at: Utc::now(),
            build,
        });
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<Option<Snapshot>, StoreError> {
        let id = crate::validate_id(id)?.to_string();
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let id = crate::validate_id(id)?.to_string();
        let mut snapshots = self.snapshots.write().await;
        let len_before = snapshots.len();
        snapshots.retain(|s| s.id != id);
        Ok(snapshots.len() < len_before)
    }

    async fn list(&self) -> Result<Vec<SnapshotMeta>, StoreError> {
        let snapshots = self.snapshots.read().await;
        // Newest first; pushes are chronological.
        Ok(snapshots.iter().rev().map(SnapshotMeta::from).collect())
    }
}
