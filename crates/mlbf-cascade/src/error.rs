//! Error types for the MLBF cascade subsystem

use thiserror::Error;

use crate::domain::Key;

/// Errors that can occur while building, persisting or comparing filter generations
///
/// Every variant except `Store(StoreError::NotFound { .. })` during a base-reset
/// check aborts the current generation.
#[derive(Debug, Error)]
pub enum MlbfError {
    #[error("Cascade did not converge within {max_layers} layers ({remaining} keys still misclassified)")]
    NonConvergence { max_layers: usize, remaining: usize },

    #[error("Verification failed: {false_negatives} blocked keys resolved as not blocked (first: {first})")]
    VerificationFailed { false_negatives: usize, first: Key },

    #[error("Blocked and not-blocked key sets overlap in {count} keys")]
    OverlappingKeySets { count: usize },

    #[error("Layer {layer} needs {bits} bits, exceeding the format limit")]
    LayerTooLarge { layer: usize, bits: u64 },

    #[error("Invalid false positive rate {rate} for layer {layer}")]
    InvalidFpr { layer: usize, rate: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed snapshot {artifact}: {message}")]
    MalformedSnapshot { artifact: String, message: String },

    #[error("Filter format error: {0}")]
    Format(#[from] FormatError),

    #[error("Artifact store error: {0}")]
    Store(#[from] StoreError),

    #[error("Version source error: {0}")]
    Data(#[from] DataError),
}

/// Errors decoding a serialized cascade
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Truncated filter: needed {needed} bytes at offset {offset}")]
    Truncated { needed: usize, offset: usize },

    #[error("Unsupported filter version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(u8),

    #[error("Invalid salt length: {0}")]
    InvalidSaltLength(u8),

    #[error("Invalid polarity {value} on layer {layer}")]
    InvalidPolarity { layer: usize, value: u8 },

    #[error("Invalid layer {layer}: {reason}")]
    InvalidLayer { layer: usize, reason: &'static str },

    #[error("{0} trailing bytes after last layer")]
    TrailingBytes(usize),
}

/// Errors from the artifact store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Artifact not found: {path}")]
    NotFound { path: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid generation id: {0:?}")]
    InvalidGenerationId(String),
}

/// Errors from version data providers
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),
}
