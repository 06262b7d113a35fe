//! Alternating-polarity Bloom filter cascade
//!
//! Layer 0 holds every blocked key. Each further layer holds the keys of
//! the opposite class that the previous layer wrongly admitted, until a
//! layer admits none. The result is exact over the build inputs: zero
//! false negatives, and zero false positives over the not-blocked set.
//!
//! INVARIANTS:
//! - Every blocked key used to build the cascade resolves to blocked
//! - Construction that needs more than `max_layers` layers fails, it is never truncated

use std::collections::HashSet;
use tracing::debug;

use super::bloom_layer::{BloomLayer, Polarity};
use super::hash_functions::{HashAlgorithm, LayerSeed, Salt};
use super::key::{encode_key, Key};
use super::parameters::{calculate_optimal_parameters, FprSchedule};
use crate::error::MlbfError;

/// Hard upper bound on layers; layer numbers are stored in one byte
pub const MAX_LAYERS_LIMIT: usize = u8::MAX as usize;

/// Default layer cap
pub const DEFAULT_MAX_LAYERS: usize = 128;

/// Ordered chain of Bloom layers sharing one salt and hash algorithm
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    algorithm: HashAlgorithm,
    salt: Salt,
    layers: Vec<BloomLayer>,
}

impl Cascade {
    /// Assemble a cascade from decoded parts
    pub(crate) fn from_parts(
        algorithm: HashAlgorithm,
        salt: Salt,
        layers: Vec<BloomLayer>,
    ) -> Self {
        Self {
            algorithm,
            salt,
            layers,
        }
    }

    /// Decision rule: walk the layers, the first layer that does not
    /// contain the key decides by its polarity; a key present in every
    /// layer takes the polarity of the last one.
    pub fn contains(&self, element: &[u8]) -> bool {
        for layer in &self.layers {
            if !layer.contains(element) {
                return layer.polarity() == Polarity::Exclude;
            }
        }
        self.layers
            .last()
            .map(|layer| layer.polarity() == Polarity::Include)
            .unwrap_or(false)
    }

    pub fn is_blocked(&self, key: &Key) -> bool {
        self.contains(key.as_bytes())
    }

    /// Encode `(guid, version)` and evaluate it
    pub fn is_version_blocked(&self, guid: &str, version: &str) -> bool {
        self.is_blocked(&encode_key(guid, version))
    }

    pub fn layers(&self) -> &[BloomLayer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total bits across all layers
    pub fn bit_count(&self) -> usize {
        self.layers.iter().map(BloomLayer::size_bits).sum()
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }
}

/// Builds a `Cascade` from disjoint blocked and not-blocked key sets
#[derive(Clone, Debug)]
pub struct CascadeBuilder {
    salt: Salt,
    algorithm: HashAlgorithm,
    max_layers: usize,
}

impl CascadeBuilder {
    /// Builder with the given salt, SHA-256 hashing and the default layer cap
    pub fn new(salt: Salt) -> Self {
        Self {
            salt,
            algorithm: HashAlgorithm::default(),
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Layer cap, clamped to `1..=MAX_LAYERS_LIMIT`
    pub fn max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = max_layers.clamp(1, MAX_LAYERS_LIMIT);
        self
    }

    /// Build the cascade
    ///
    /// Both inputs are de-duplicated; a key present in both is rejected
    /// since no cascade can classify it.
    pub fn build(
        &self,
        blocked: &[Key],
        not_blocked: &[Key],
        rates: &FprSchedule,
    ) -> Result<Cascade, MlbfError> {
        let blocked = unique(blocked);
        let not_blocked = unique(not_blocked);

        let blocked_set: HashSet<&Key> = blocked.iter().copied().collect();
        let overlap = not_blocked
            .iter()
            .filter(|key| blocked_set.contains(*key))
            .count();
        if overlap > 0 {
            return Err(MlbfError::OverlappingKeySets { count: overlap });
        }

        let mut layers = Vec::new();
        let mut inserting = blocked;
        let mut testing = not_blocked;

        loop {
            let index = layers.len();
            if index >= self.max_layers {
                return Err(MlbfError::NonConvergence {
                    max_layers: self.max_layers,
                    remaining: inserting.len(),
                });
            }

            let rate = rates.rate_for(index);
            let layer = self.build_layer(index, &inserting, rate)?;

            let false_positives: Vec<&Key> = testing
                .iter()
                .copied()
                .filter(|key| layer.contains(key.as_bytes()))
                .collect();

            debug!(
                layer = index,
                polarity = ?layer.polarity(),
                elements = inserting.len(),
                bits = layer.size_bits(),
                hashes = layer.hash_count(),
                rate,
                false_positives = false_positives.len(),
                "Built cascade layer"
            );

            layers.push(layer);

            if false_positives.is_empty() {
                break;
            }
            testing = inserting;
            inserting = false_positives;
        }

        Ok(Cascade {
            algorithm: self.algorithm,
            salt: self.salt,
            layers,
        })
    }

    fn build_layer(&self, index: usize, keys: &[&Key], rate: f64) -> Result<BloomLayer, MlbfError> {
        let seed = LayerSeed {
            algorithm: self.algorithm,
            salt: self.salt,
            // index < max_layers <= 255
            layer_number: (index + 1) as u8,
        };
        let params = calculate_optimal_parameters(keys.len(), rate);
        if params.size_bits > u32::MAX as usize {
            return Err(MlbfError::LayerTooLarge {
                layer: index,
                bits: params.size_bits as u64,
            });
        }

        let mut layer = BloomLayer::new(
            params.size_bits,
            params.hash_count,
            Polarity::for_index(index),
            seed,
        );
        for key in keys {
            layer.insert(key.as_bytes());
        }
        Ok(layer)
    }
}

fn unique(keys: &[Key]) -> Vec<&Key> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter().filter(|key| seen.insert(*key)).collect()
}
