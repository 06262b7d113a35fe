//! Service Layer
//!
//! Orchestrates domain logic and coordinates with the artifact store
//! and version source through ports.

pub mod mlbf_service;

pub use mlbf_service::MlbfService;
