//! Inbound Ports (Driving Ports)
//!
//! The API a scheduling job uses to build generations, write stashes and
//! decide when a new base filter is due.

use crate::domain::{BuildStats, Cascade, GenerationId, Key, Stash, VersionPair};
use crate::error::MlbfError;
use crate::ports::outbound::VersionSource;

/// Primary MLBF API (Driving Port)
pub trait MlbfApi: Send + Sync {
    /// Build, verify and persist a generation from resolved version lists
    ///
    /// Nothing is published when the build fails.
    fn generate_and_write(
        &self,
        id: &GenerationId,
        blocked: &[VersionPair],
        not_blocked: &[VersionPair],
    ) -> Result<BuildStats, MlbfError>;

    /// Resolve the version lists from `source`, then `generate_and_write`
    fn generate_from_source(
        &self,
        id: &GenerationId,
        source: &dyn VersionSource,
    ) -> Result<BuildStats, MlbfError>;

    /// Diff `previous`'s blocked snapshot against `id`'s and persist the stash
    fn write_stash(&self, id: &GenerationId, previous: &GenerationId) -> Result<Stash, MlbfError>;

    /// Whether drift from `base` requires distributing a new full filter
    ///
    /// A base without a blocked snapshot always requires a reset.
    fn should_reset_base(&self, id: &GenerationId, base: &GenerationId) -> Result<bool, MlbfError>;

    fn load_blocked(&self, id: &GenerationId) -> Result<Vec<Key>, MlbfError>;

    fn load_not_blocked(&self, id: &GenerationId) -> Result<Vec<Key>, MlbfError>;

    fn load_stash(&self, id: &GenerationId) -> Result<Stash, MlbfError>;

    fn load_cascade(&self, id: &GenerationId) -> Result<Cascade, MlbfError>;
}
