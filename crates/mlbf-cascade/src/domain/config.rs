//! Generation build configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use mlbf_cascade::domain::MlbfConfigBuilder;
//!
//! let config = MlbfConfigBuilder::new()
//!     .storage_root("/var/lib/mlbf")
//!     .base_replace_threshold(500)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::cascade::{DEFAULT_MAX_LAYERS, MAX_LAYERS_LIMIT};
use super::hash_functions::HashAlgorithm;
use super::parameters::{DEFAULT_SUBSEQUENT_FPR, MAX_FPR, MIN_FPR};
use super::reset_policy::BASE_REPLACE_THRESHOLD;
use crate::error::MlbfError;

/// Generation build configuration
#[derive(Clone, Debug, PartialEq)]
pub struct MlbfConfig {
    /// Root directory holding one sub-directory per generation
    pub storage_root: PathBuf,
    /// Drift from the base generation tolerated before a reset
    pub base_replace_threshold: usize,
    /// Layer cap before construction is declared non-convergent
    pub max_layers: usize,
    pub hash_algorithm: HashAlgorithm,
    /// Rate for layers 1.. (layer 0 scales with the class imbalance)
    pub subsequent_fpr: f64,
}

impl Default for MlbfConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("mlbf"),
            base_replace_threshold: BASE_REPLACE_THRESHOLD,
            max_layers: DEFAULT_MAX_LAYERS,
            hash_algorithm: HashAlgorithm::Sha256,
            subsequent_fpr: DEFAULT_SUBSEQUENT_FPR,
        }
    }
}

impl MlbfConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MLBF_STORAGE_PATH`: Generation root directory (default: mlbf)
    /// - `MLBF_BASE_REPLACE_THRESHOLD`: Base drift threshold (default: 500)
    /// - `MLBF_MAX_LAYERS`: Layer cap (default: 128)
    /// - `MLBF_HASH_ALGORITHM`: `sha256` or `murmur3` (default: sha256)
    /// - `MLBF_SUBSEQUENT_FPR`: Target rate for layers after the first (default: 0.5)
    ///
    /// Unparseable values are rejected rather than silently defaulted.
    pub fn from_env() -> Result<Self, MlbfError> {
        let defaults = Self::default();

        let config = Self {
            storage_root: env::var("MLBF_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_root),

            base_replace_threshold: parse_var("MLBF_BASE_REPLACE_THRESHOLD")?
                .unwrap_or(defaults.base_replace_threshold),

            max_layers: parse_var("MLBF_MAX_LAYERS")?.unwrap_or(defaults.max_layers),

            hash_algorithm: match env::var("MLBF_HASH_ALGORITHM") {
                Ok(name) => HashAlgorithm::parse(&name).ok_or_else(|| {
                    MlbfError::InvalidConfig(format!("unknown hash algorithm {name:?}"))
                })?,
                Err(_) => defaults.hash_algorithm,
            },

            subsequent_fpr: parse_var("MLBF_SUBSEQUENT_FPR")?.unwrap_or(defaults.subsequent_fpr),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MlbfError> {
        if self.max_layers == 0 || self.max_layers > MAX_LAYERS_LIMIT {
            return Err(MlbfError::InvalidConfig(format!(
                "max_layers must be between 1 and {MAX_LAYERS_LIMIT}, got {}",
                self.max_layers
            )));
        }

        if !(MIN_FPR..=MAX_FPR).contains(&self.subsequent_fpr) {
            return Err(MlbfError::InvalidFpr {
                layer: 1,
                rate: self.subsequent_fpr,
            });
        }

        if self.storage_root.as_os_str().is_empty() {
            return Err(MlbfError::InvalidConfig(
                "storage_root cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, MlbfError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| MlbfError::InvalidConfig(format!("{name}={raw:?} is not a number"))),
        Err(_) => Ok(None),
    }
}

/// Builder for MlbfConfig with validation
#[derive(Default)]
pub struct MlbfConfigBuilder {
    storage_root: Option<PathBuf>,
    base_replace_threshold: Option<usize>,
    max_layers: Option<usize>,
    hash_algorithm: Option<HashAlgorithm>,
    subsequent_fpr: Option<f64>,
}

impl MlbfConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = Some(root.into());
        self
    }

    pub fn base_replace_threshold(mut self, threshold: usize) -> Self {
        self.base_replace_threshold = Some(threshold);
        self
    }

    pub fn max_layers(mut self, layers: usize) -> Self {
        self.max_layers = Some(layers);
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = Some(algorithm);
        self
    }

    pub fn subsequent_fpr(mut self, rate: f64) -> Self {
        self.subsequent_fpr = Some(rate);
        self
    }

    /// Build the MlbfConfig, validating all parameters
    pub fn build(self) -> Result<MlbfConfig, MlbfError> {
        let defaults = MlbfConfig::default();

        let config = MlbfConfig {
            storage_root: self.storage_root.unwrap_or(defaults.storage_root),
            base_replace_threshold: self
                .base_replace_threshold
                .unwrap_or(defaults.base_replace_threshold),
            max_layers: self.max_layers.unwrap_or(defaults.max_layers),
            hash_algorithm: self.hash_algorithm.unwrap_or(defaults.hash_algorithm),
            subsequent_fpr: self.subsequent_fpr.unwrap_or(defaults.subsequent_fpr),
        };

        config.validate()?;
        Ok(config)
    }
}
