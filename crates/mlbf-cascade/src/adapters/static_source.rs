//! In-memory version source
//!
//! Stands in for the relational store in tests and one-off rebuilds.

use std::collections::{BTreeMap, HashSet};

use crate::domain::VersionPair;
use crate::error::DataError;
use crate::ports::{VersionId, VersionSource};

/// Fixed set of known versions, some of them blocked
#[derive(Clone, Debug, Default)]
pub struct StaticVersionSource {
    versions: BTreeMap<VersionId, VersionPair>,
    blocked: HashSet<VersionId>,
}

impl StaticVersionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a known version
    pub fn with_version(mut self, id: VersionId, pair: impl Into<VersionPair>) -> Self {
        self.versions.insert(id, pair.into());
        self
    }

    /// Register a version and mark it blocked
    pub fn with_blocked_version(mut self, id: VersionId, pair: impl Into<VersionPair>) -> Self {
        self.versions.insert(id, pair.into());
        self.blocked.insert(id);
        self
    }
}

impl VersionSource for StaticVersionSource {
    fn blocked_versions(&self) -> Result<BTreeMap<VersionId, VersionPair>, DataError> {
        Ok(self
            .versions
            .iter()
            .filter(|(id, _)| self.blocked.contains(*id))
            .map(|(id, pair)| (*id, pair.clone()))
            .collect())
    }

    fn all_versions(&self, excluding: &[VersionId]) -> Result<Vec<VersionPair>, DataError> {
        let excluding: HashSet<&VersionId> = excluding.iter().collect();
        Ok(self
            .versions
            .iter()
            .filter(|(id, _)| !excluding.contains(id))
            .map(|(_, pair)| pair.clone())
            .collect())
    }
}
