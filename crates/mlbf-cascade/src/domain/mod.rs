//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Key encoding
//! - Hash functions and layer sizing
//! - Bloom layers and the cascade builder
//! - Verification and the binary filter format
//! - Snapshot diffs, stashes and the base-reset policy
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_layer;
pub mod cascade;
pub mod config;
pub mod diff;
pub mod generation;
pub mod hash_functions;
pub mod key;
pub mod parameters;
pub mod reset_policy;
pub mod stash;
pub mod verifier;
pub mod wire_format;

pub use bloom_layer::{BloomLayer, Polarity};
pub use cascade::{Cascade, CascadeBuilder, DEFAULT_MAX_LAYERS, MAX_LAYERS_LIMIT};
pub use config::{MlbfConfig, MlbfConfigBuilder};
pub use diff::{diff, KeyDiff};
pub use generation::{
    BuildStats, Generation, GenerationId, BLOCKED_ARTIFACT, FILTER_ARTIFACT, NOT_BLOCKED_ARTIFACT,
    STASH_ARTIFACT,
};
pub use hash_functions::{HashAlgorithm, LayerSeed, Salt, SALT_LEN};
pub use key::{encode_key, encode_keys, Key, VersionPair, KEY_SEPARATOR};
pub use parameters::{
    calculate_optimal_parameters, BloomFilterParams, FprSchedule, MAX_HASH_COUNT,
};
pub use reset_policy::{BaseResetPolicy, BASE_REPLACE_THRESHOLD};
pub use stash::Stash;
pub use verifier::{verify, VerificationReport};
pub use wire_format::FORMAT_VERSION;
