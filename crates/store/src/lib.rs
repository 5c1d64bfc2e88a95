//! Build snapshot storage implementations for Rigsmith.

pub mod in_memory;
pub mod file_backend;

pub use in_memory::InMemoryBuildStore;
pub use file_backend::FileBuildStore;

use rigsmith_core::error::StoreError;

/// Snapshot ids are UUID v4 strings. Anything else is rejected before it
/// can reach a file path.
pub(crate) fn validate_id(id: &str) -> Result<uuid::Uuid, StoreError> {
    uuid::Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
