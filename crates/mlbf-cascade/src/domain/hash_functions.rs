//! Hash functions for cascade layers
//!
//! Every layer hashes keys with seeds derived from the cascade salt and the
//! layer's 1-based position, so the same key lands on independent bits in
//! each layer.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;

use crate::error::FormatError;

/// Salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// Seed multiplier for murmur3 hash function `i`
const MURMUR_SEED_MULTIPLIER: u32 = 0xFBA4_C795;

/// Hash algorithm identifier stored in the filter header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Murmur3 = 1,
    #[default]
    Sha256 = 2,
}

impl HashAlgorithm {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Result<Self, FormatError> {
        match id {
            1 => Ok(Self::Murmur3),
            2 => Ok(Self::Sha256),
            other => Err(FormatError::UnknownHashAlgorithm(other)),
        }
    }

    /// Parse a configuration value (`sha256` or `murmur3`)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha256" => Some(Self::Sha256),
            "murmur3" => Some(Self::Murmur3),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Murmur3 => f.write_str("murmur3"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Per-cascade 128-bit salt
///
/// Supplied by the caller for reproducible builds, or drawn from the OS RNG.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn new(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", hex::encode(self.0))
    }
}

/// Hash seed of one layer: algorithm, cascade salt and 1-based layer number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerSeed {
    pub algorithm: HashAlgorithm,
    pub salt: Salt,
    pub layer_number: u8,
}

impl LayerSeed {
    /// Hash function `i` of this layer, reduced modulo `m` bits
    fn position(&self, element: &[u8], i: u32, m: usize) -> usize {
        let hash = match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(self.salt.as_bytes());
                hasher.update(i.to_le_bytes());
                hasher.update([self.layer_number]);
                hasher.update(element);
                let digest = hasher.finalize();
                u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
            }
            HashAlgorithm::Murmur3 => {
                let seed = i
                    .wrapping_mul(MURMUR_SEED_MULTIPLIER)
                    .wrapping_add(u32::from(self.layer_number));
                let mut source = (&self.salt.as_bytes()[..]).chain(element);
                murmur3::murmur3_32(&mut source, seed).unwrap_or(0)
            }
        };
        (hash as u64 % m as u64) as usize
    }
}

/// Compute k bit positions for an element within an m-bit layer, lazily
pub fn compute_hash_positions<'a>(
    element: &'a [u8],
    k: u32,
    m: usize,
    seed: &'a LayerSeed,
) -> impl Iterator<Item = usize> + 'a {
    (0..k).map(move |i| seed.position(element, i, m))
}
