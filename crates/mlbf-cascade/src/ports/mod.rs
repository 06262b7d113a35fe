//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the scheduling job
//! - Driven Ports (outbound) - Artifact storage and version data

pub mod inbound;
pub mod outbound;

pub use inbound::MlbfApi;
pub use outbound::{ArtifactStore, VersionId, VersionSource};
