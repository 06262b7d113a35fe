//! Build generations
//!
//! A generation is one build epoch: its key-set snapshots, its cascade and
//! the statistics describing the build. Generations are never mutated; a
//! new build produces a new generation.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::cascade::{Cascade, CascadeBuilder};
use super::config::MlbfConfig;
use super::hash_functions::{HashAlgorithm, Salt};
use super::key::{encode_keys, Key, VersionPair};
use super::parameters::FprSchedule;
use super::verifier::{verify, VerificationReport};
use super::wire_format::FORMAT_VERSION;
use crate::error::{MlbfError, StoreError};

/// Binary cascade artifact
pub const FILTER_ARTIFACT: &str = "filter";
/// Blocked key snapshot artifact
pub const BLOCKED_ARTIFACT: &str = "blocked.json";
/// Not-blocked key snapshot artifact
pub const NOT_BLOCKED_ARTIFACT: &str = "notblocked.json";
/// Incremental stash artifact
pub const STASH_ARTIFACT: &str = "stash.json";

/// Identifier of a generation, used as its artifact namespace
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationId(String);

impl GenerationId {
    /// Validate an id; it must be usable as a single path segment
    pub fn new(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        let invalid = id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StoreError::InvalidGenerationId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<u64> for GenerationId {
    type Error = StoreError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id.to_string())
    }
}

/// Diagnostics attached to every build
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildStats {
    pub blocked_count: usize,
    pub not_blocked_count: usize,
    pub fprs: Vec<f64>,
    pub version: u16,
    pub hash_algorithm: HashAlgorithm,
    pub layer_count: usize,
    pub bit_count: usize,
    pub measured_fpr: f64,
    /// Size of the serialized filter, once written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_size: Option<u64>,
}

/// Output of one build
#[derive(Clone, Debug)]
pub struct Generation {
    pub id: GenerationId,
    pub blocked: Vec<Key>,
    pub not_blocked: Vec<Key>,
    pub cascade: Cascade,
    pub stats: BuildStats,
    pub verification: VerificationReport,
}

impl Generation {
    /// Encode, build and verify a generation
    ///
    /// The salt is explicit so builds can be reproduced.
    pub fn build(
        id: GenerationId,
        blocked: &[VersionPair],
        not_blocked: &[VersionPair],
        config: &MlbfConfig,
        salt: Salt,
    ) -> Result<Self, MlbfError> {
        let blocked = encode_keys(blocked);
        let not_blocked = encode_keys(not_blocked);

        let rates =
            FprSchedule::reference(blocked.len(), not_blocked.len(), config.subsequent_fpr)?;

        debug!(
            generation = %id,
            blocked = blocked.len(),
            not_blocked = not_blocked.len(),
            fprs = ?rates.rates(),
            "Generating filter"
        );

        let cascade = CascadeBuilder::new(salt)
            .hash_algorithm(config.hash_algorithm)
            .max_layers(config.max_layers)
            .build(&blocked, &not_blocked, &rates)?;

        let verification = verify(&cascade, &blocked, &not_blocked)?;

        let stats = BuildStats {
            blocked_count: blocked.len(),
            not_blocked_count: not_blocked.len(),
            fprs: rates.rates().to_vec(),
            version: FORMAT_VERSION,
            hash_algorithm: cascade.hash_algorithm(),
            layer_count: cascade.layer_count(),
            bit_count: cascade.bit_count(),
            measured_fpr: verification.false_positive_rate,
            filter_size: None,
        };

        Ok(Self {
            id,
            blocked,
            not_blocked,
            cascade,
            stats,
            verification,
        })
    }
}
