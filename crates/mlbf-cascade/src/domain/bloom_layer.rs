//! Single Bloom layer of a cascade
//!
//! INVARIANTS:
//! - No false negatives: after `insert(x)`, `contains(x)` MUST return true
//! - FPR = (1 - e^(-kn/m))^k <= target rate the layer was sized for

use bitvec::prelude::*;

use super::hash_functions::{compute_hash_positions, LayerSeed};
use super::parameters::calculate_optimal_parameters;

/// Whether presence in a layer argues for or against "blocked"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Built over blocked keys (layers 0, 2, 4, ...)
    Include = 0,
    /// Built over not-blocked keys (layers 1, 3, 5, ...)
    Exclude = 1,
}

impl Polarity {
    /// Polarity of the layer at `index` in an alternating cascade
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Include
        } else {
            Self::Exclude
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Include),
            1 => Some(Self::Exclude),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// One Bloom filter in the cascade
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomLayer {
    /// Bit array storing the layer state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    hash_count: u32,
    polarity: Polarity,
    seed: LayerSeed,
}

impl BloomLayer {
    /// Create an empty layer with `m` bits (at least one) and `k` hash functions
    pub fn new(m: usize, k: u32, polarity: Polarity, seed: LayerSeed) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; m.max(1)],
            hash_count: k,
            polarity,
            seed,
        }
    }

    /// Create a layer sized for `expected_elements` at `target_fpr`
    pub fn with_fpr(
        expected_elements: usize,
        target_fpr: f64,
        polarity: Polarity,
        seed: LayerSeed,
    ) -> Self {
        let params = calculate_optimal_parameters(expected_elements, target_fpr);
        Self::new(params.size_bits, params.hash_count, polarity, seed)
    }

    /// Rebuild a layer from its serialized parts
    ///
    /// `raw` must hold exactly `ceil(m / 8)` bytes.
    pub(crate) fn from_raw(
        raw: Vec<u8>,
        m: usize,
        k: u32,
        polarity: Polarity,
        seed: LayerSeed,
    ) -> Self {
        let mut bits = BitVec::<u8, Lsb0>::from_vec(raw);
        bits.truncate(m);
        bits.set_uninitialized(false);
        Self {
            bits,
            hash_count: k,
            polarity,
            seed,
        }
    }

    pub fn insert(&mut self, element: &[u8]) {
        let m = self.bits.len();
        let seed = self.seed;
        for pos in compute_hash_positions(element, self.hash_count, m, &seed) {
            self.bits.set(pos, true);
        }
    }

    /// `false` means definitely not inserted
    pub fn contains(&self, element: &[u8]) -> bool {
        let m = self.bits.len();
        compute_hash_positions(element, self.hash_count, m, &self.seed).all(|pos| self.bits[pos])
    }

    pub fn size_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn seed(&self) -> &LayerSeed {
        &self.seed
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Raw backing bytes, least significant bit first
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}
