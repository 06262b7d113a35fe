//! Binary filter format consumed by client decoders
//!
//! All integers are little-endian.
//!
//! ```text
//! header: [version:u16][hash_alg:u8][salt_len:u8][salt][layer_count:u8]
//! layer:  [bit_len:u32][hash_count:u32][polarity:u8][ceil(bit_len/8) bytes, lsb first]
//! ```
//!
//! Layer numbers are implicit in layer order.

use super::bloom_layer::{BloomLayer, Polarity};
use super::cascade::Cascade;
use super::hash_functions::{HashAlgorithm, LayerSeed, Salt, SALT_LEN};
use super::parameters::MAX_HASH_COUNT;
use crate::error::FormatError;

/// Format version written in the header
pub const FORMAT_VERSION: u16 = 2;

impl Cascade {
    /// Serialize the cascade to its binary filter form
    pub fn to_bytes(&self) -> Vec<u8> {
        let body: usize = self
            .layers()
            .iter()
            .map(|layer| 9 + layer.as_raw_bytes().len())
            .sum();
        let mut bytes = Vec::with_capacity(5 + SALT_LEN + body);

        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.push(self.hash_algorithm().id());
        bytes.push(SALT_LEN as u8);
        bytes.extend_from_slice(self.salt().as_bytes());
        // layer_count <= MAX_LAYERS_LIMIT
        bytes.push(self.layer_count() as u8);

        for layer in self.layers() {
            bytes.extend_from_slice(&(layer.size_bits() as u32).to_le_bytes());
            bytes.extend_from_slice(&layer.hash_count().to_le_bytes());
            bytes.push(layer.polarity().id());
            bytes.extend_from_slice(layer.as_raw_bytes());
        }

        bytes
    }

    /// Parse a binary filter
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(bytes);

        let version = u16::from_le_bytes(reader.array()?);
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let algorithm = HashAlgorithm::from_id(reader.byte()?)?;

        let salt_len = reader.byte()?;
        if salt_len as usize != SALT_LEN {
            return Err(FormatError::InvalidSaltLength(salt_len));
        }
        let salt = Salt::new(reader.array()?);

        let layer_count = reader.byte()? as usize;
        let mut layers = Vec::with_capacity(layer_count);

        for index in 0..layer_count {
            let bit_len = u32::from_le_bytes(reader.array()?) as usize;
            let hash_count = u32::from_le_bytes(reader.array()?);
            let polarity_id = reader.byte()?;
            let polarity = Polarity::from_id(polarity_id).ok_or(FormatError::InvalidPolarity {
                layer: index,
                value: polarity_id,
            })?;

            if bit_len == 0 {
                return Err(FormatError::InvalidLayer {
                    layer: index,
                    reason: "zero bit length",
                });
            }
            if hash_count == 0 {
                return Err(FormatError::InvalidLayer {
                    layer: index,
                    reason: "zero hash functions",
                });
            }
            if hash_count > MAX_HASH_COUNT {
                return Err(FormatError::InvalidLayer {
                    layer: index,
                    reason: "too many hash functions",
                });
            }

            let raw = reader.take(bit_len.div_ceil(8))?.to_vec();
            let seed = LayerSeed {
                algorithm,
                salt,
                layer_number: (index + 1) as u8,
            };
            layers.push(BloomLayer::from_raw(raw, bit_len, hash_count, polarity, seed));
        }

        if reader.remaining() > 0 {
            return Err(FormatError::TrailingBytes(reader.remaining()));
        }

        Ok(Cascade::from_parts(algorithm, salt, layers))
    }
}

/// Bounds-checked cursor over the filter bytes
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(FormatError::Truncated {
                needed: len,
                offset: self.offset,
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn byte(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}
