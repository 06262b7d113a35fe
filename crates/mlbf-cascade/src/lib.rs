//! # MLBF Cascade
//!
//! Multi-level Bloom filter blocklist: an exact membership oracle over a
//! known universe of add-on versions, published as one compact binary filter
//! per generation.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `Key`, `encode_key`: Canonical `guid:version` keys
//!   - `BloomLayer`, `Cascade`, `CascadeBuilder`: Alternating-polarity filter cascade
//!   - `verify`: Post-build exactness check
//!   - `diff`, `Stash`: Snapshot comparison between generations
//!   - `BaseResetPolicy`: Decides when a full base filter must be rebuilt
//!   - `MlbfConfig`, `MlbfConfigBuilder`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MlbfApi`: Driving port (inbound API)
//!   - `ArtifactStore`: Driven port for generation artifacts
//!   - `VersionSource`: Driven port for blocked and known versions
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `MlbfService`: Implements `MlbfApi`
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `FsArtifactStore`: One directory per generation
//!   - `InMemoryArtifactStore`, `StaticVersionSource`: Test and tooling backends
//!
//! ## Invariants
//!
//! - Every blocked key resolves as blocked and every not-blocked key resolves
//!   as not blocked; a build that cannot guarantee this fails.
//! - Layer `i` has Include polarity when `i` is even and Exclude when odd.
//! - `blocked.json` is written last; its presence marks a complete generation.
//!
//! ## Usage Example
//!
//! ```ignore
//! use mlbf_cascade::{
//!     FsArtifactStore, GenerationId, MlbfApi, MlbfConfig, MlbfService, VersionPair,
//! };
//! use std::sync::Arc;
//!
//! let config = MlbfConfig::from_env()?;
//! let store = Arc::new(FsArtifactStore::from_config(&config));
//! let service = MlbfService::with_config(store, config);
//!
//! let id = GenerationId::new("1700000000000")?;
//! let blocked = vec![VersionPair::new("g1", "1.0")];
//! let not_blocked = vec![VersionPair::new("g3", "1.0")];
//! let stats = service.generate_and_write(&id, &blocked, &not_blocked)?;
//!
//! let cascade = service.load_cascade(&id)?;
//! assert!(cascade.is_version_blocked("g1", "1.0"));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FsArtifactStore, InMemoryArtifactStore, StaticVersionSource};
pub use domain::{
    diff, encode_key, encode_keys, verify, BaseResetPolicy, BloomLayer, BuildStats, Cascade,
    CascadeBuilder, FprSchedule, Generation, GenerationId, HashAlgorithm, Key, KeyDiff,
    MlbfConfig, MlbfConfigBuilder, Polarity, Salt, Stash, VerificationReport, VersionPair,
};
pub use error::{DataError, FormatError, MlbfError, StoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{ArtifactStore, MlbfApi, VersionId, VersionSource};
pub use service::MlbfService;
