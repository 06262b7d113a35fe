//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the driven ports.
//!
//! ## Adapters
//!
//! - `FsArtifactStore` - Generation artifacts on a local or mounted filesystem
//! - `InMemoryArtifactStore` - Artifacts held in memory (tests)
//! - `StaticVersionSource` - Fixed version lists (tests, one-off rebuilds)

pub mod fs_store;
pub mod memory_store;
pub mod static_source;

pub use fs_store::FsArtifactStore;
pub use memory_store::InMemoryArtifactStore;
pub use static_source::StaticVersionSource;
