//! File-based snapshot backend, one JSON document per build.
//!
//! Storage location: `~/.rigsmith/builds/<id>.json` by default.
//!
//! Snapshots are written whole on save and never modified afterwards, so
//! there is no in-memory index to keep in sync; every read goes to disk.
//! Files that fail to parse are skipped with a warning.

use async_trait::async_trait;
use chrono::Utc;
use rigsmith_core::error::StoreError;
use rigsmith_core::{Build, BuildStore, Snapshot, SnapshotMeta};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// A directory of JSON build snapshots.
pub struct FileBuildStore {
    dir: PathBuf,
}

impl FileBuildStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: PathBuf) -> Self {
        debug!(dir = %dir.display(), "File build store opened");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read_snapshot(path: &Path) -> Result<Option<Snapshot>, StoreError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Storage(format!(
                    "Failed to read snapshot {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Encoding(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl BuildStore for FileBuildStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn save(&self, build: Build) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        let snapshot = Snapshot {
            id: id.to_string(),
            created_at: Utc::now(),
            build,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StoreError::Storage(format!("Failed to create snapshot directory: {e}"))
        })?;

        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StoreError::Encoding(e.to_string()))?;

        tokio::fs::write(self.path_for(&id), content)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to write snapshot: {e}")))?;

        debug!(id = %id, total = snapshot.build.total_price(), "Snapshot saved");
        Ok(snapshot.id)
    }

    async fn load(&self, id: &str) -> Result<Option<Snapshot>, StoreError> {
        let uuid = crate::validate_id(id)?;
        Self::read_snapshot(&self.path_for(&uuid)).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let uuid = crate::validate_id(id)?;
        match tokio::fs::remove_file(self.path_for(&uuid)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Storage(format!("Failed to delete snapshot: {e}"))),
        }
    }

    async fn list(&self) -> Result<Vec<SnapshotMeta>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Nothing saved yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Storage(format!("Failed to list snapshots: {e}"))),
        };

        let mut metas = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match Self::read_snapshot(&path).await {
                Ok(Some(snapshot)) => metas.push(SnapshotMeta::from(&snapshot)),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Skipping unreadable snapshot"),
            }
        }

        metas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(metas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigsmith_core::{Category, Component};

    fn sample_build() -> Build {
        let mut build = Build::new();
        build.add_or_replace(Category::Cpu, Component::new("Ryzen 5 7600", 199.0).with_socket("AM5"));
        build.add_or_replace(Category::Memory, Component::new("32GB DDR5", 94.0).with_memory_type("DDR5"));
        build
    }

    #[tokio::test]
    async fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBuildStore::new(dir.path().join("builds"));

        let id = store.save(sample_build()).await.unwrap();
        assert!(dir.path().join("builds").join(format!("{id}.json")).exists());

        let snapshot = store.load(&id).await.unwrap().unwrap();
        assert_eq!(snapshot.build, sample_build());
        assert_eq!(snapshot.build.total_price(), 293.0);
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let id = FileBuildStore::new(dir.path().to_path_buf())
            .save(sample_build())
            .await
            .unwrap();

        let reopened = FileBuildStore::new(dir.path().to_path_buf());
        assert!(reopened.load(&id).await.unwrap().is_some());
        assert_eq!(reopened.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBuildStore::new(dir.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupted_files_are_skipped_in_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBuildStore::new(dir.path().to_path_buf());
        store.save(sample_build()).await.unwrap();
        std::fs::write(dir.path().join(format!("{}.json", Uuid::new_v4())), "{not json").unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].component_count, 2);
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBuildStore::new(dir.path().to_path_buf());
        let id = store.save(sample_build()).await.unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn path_traversal_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBuildStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.load("../secrets").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.delete("../secrets").await,
            Err(StoreError::InvalidId(_))
        ));
    }
}
