//! Outbound Ports (Driven Ports)
//!
//! Dependencies the build needs from the outside world: somewhere to put
//! generation artifacts, and the authoritative version lists.

use std::collections::BTreeMap;

use crate::domain::{GenerationId, VersionPair};
use crate::error::{DataError, StoreError};

/// Database id of a version row
pub type VersionId = u64;

/// Blob storage for generation artifacts (Driven Port)
///
/// Artifacts are namespaced by generation id, so builds of different
/// generations never contend.
pub trait ArtifactStore: Send + Sync {
    /// Write an artifact atomically; readers never observe a partial write
    fn write(&self, id: &GenerationId, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read an artifact, `StoreError::NotFound` if it was never written
    fn read(&self, id: &GenerationId, name: &str) -> Result<Vec<u8>, StoreError>;

    fn exists(&self, id: &GenerationId, name: &str) -> Result<bool, StoreError>;

    /// Delete an artifact; deleting one that does not exist succeeds
    fn remove(&self, id: &GenerationId, name: &str) -> Result<(), StoreError>;

    /// Human-readable location, used in logs
    fn location(&self, id: &GenerationId, name: &str) -> String;
}

/// Authoritative blocked / known version lists (Driven Port)
///
/// The query logic behind this port lives with the persistence layer.
pub trait VersionSource: Send + Sync {
    /// Every version currently covered by a block
    fn blocked_versions(&self) -> Result<BTreeMap<VersionId, VersionPair>, DataError>;

    /// Every known version except the given ids
    fn all_versions(&self, excluding: &[VersionId]) -> Result<Vec<VersionPair>, DataError>;
}
