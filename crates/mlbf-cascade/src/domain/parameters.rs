//! Layer sizing and false-positive-rate schedules
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k

use std::f64::consts::{LN_2, SQRT_2};

use crate::error::MlbfError;

/// Smallest rate a schedule will hand to the sizing formula
pub const MIN_FPR: f64 = 1e-9;

/// Largest rate a schedule will hand to the sizing formula
pub const MAX_FPR: f64 = 0.5;

/// Rate for every layer after the first in the reference configuration
pub const DEFAULT_SUBSEQUENT_FPR: f64 = 0.5;

/// Layers are byte-aligned and never empty
const MIN_LAYER_BITS: usize = 8;

/// Upper bound on hash functions per layer, enforced when building and decoding
pub const MAX_HASH_COUNT: u32 = 32;

/// Bloom layer parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the layer
    pub size_bits: usize,
    /// Number of hash functions
    pub hash_count: u32,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Calculate optimal layer parameters for `num_elements` at `target_fpr`
///
/// The bit count is rounded up to a whole number of bytes.
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    if num_elements == 0 {
        return BloomFilterParams {
            size_bits: MIN_LAYER_BITS,
            hash_count: 1,
            expected_fpr: 0.0,
        };
    }

    let n = num_elements as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-n * target_fpr.ln() / ln2_squared).ceil() as usize;
    let m = m.max(MIN_LAYER_BITS).div_ceil(8) * 8;

    let k = ((m as f64 / n) * LN_2).round() as u32;
    let k = k.clamp(1, MAX_HASH_COUNT);

    BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_elements, k),
    }
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Target false positive rate per layer index
///
/// The last rate is reused for every layer beyond the list.
#[derive(Clone, Debug, PartialEq)]
pub struct FprSchedule {
    rates: Vec<f64>,
}

impl FprSchedule {
    /// Build a schedule, clamping every rate into `[MIN_FPR, MAX_FPR]`
    ///
    /// NaN and an empty list are rejected.
    pub fn new(rates: Vec<f64>) -> Result<Self, MlbfError> {
        if rates.is_empty() {
            return Err(MlbfError::InvalidConfig(
                "fpr schedule needs at least one rate".to_string(),
            ));
        }
        let rates = rates
            .into_iter()
            .enumerate()
            .map(|(layer, rate)| {
                if rate.is_nan() || rate < 0.0 {
                    Err(MlbfError::InvalidFpr { layer, rate })
                } else {
                    Ok(rate.clamp(MIN_FPR, MAX_FPR))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rates })
    }

    /// Reference schedule: `[blocked / (sqrt(2) * not_blocked), subsequent]`
    ///
    /// Layer 0 scales with the class imbalance; an empty not-blocked set
    /// clamps it to `MAX_FPR`.
    pub fn reference(
        blocked_count: usize,
        not_blocked_count: usize,
        subsequent: f64,
    ) -> Result<Self, MlbfError> {
        let first = if not_blocked_count == 0 {
            MAX_FPR
        } else {
            blocked_count as f64 / (SQRT_2 * not_blocked_count as f64)
        };
        Self::new(vec![first, subsequent])
    }

    pub fn rate_for(&self, layer: usize) -> f64 {
        // `new` guarantees at least one rate
        self.rates
            .get(layer)
            .or_else(|| self.rates.last())
            .copied()
            .unwrap_or(MAX_FPR)
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}
