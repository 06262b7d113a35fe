//! Post-build verification of a cascade
//!
//! A blocked key that resolves to "not blocked" is a builder defect and
//! aborts the generation. False positives over the not-blocked set are
//! only measured.

use serde::Serialize;

use super::cascade::Cascade;
use super::key::Key;
use crate::error::MlbfError;

/// Outcome of a successful verification
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerificationReport {
    pub blocked_checked: usize,
    pub not_blocked_checked: usize,
    pub false_positives: usize,
    pub false_positive_rate: f64,
}

/// Check every blocked key and measure false positives
///
/// Does not mutate the cascade.
pub fn verify(
    cascade: &Cascade,
    blocked: &[Key],
    not_blocked: &[Key],
) -> Result<VerificationReport, MlbfError> {
    let mut missed = blocked.iter().filter(|key| !cascade.is_blocked(key));
    if let Some(first) = missed.next() {
        return Err(MlbfError::VerificationFailed {
            false_negatives: 1 + missed.count(),
            first: first.clone(),
        });
    }

    let false_positives = not_blocked
        .iter()
        .filter(|key| cascade.is_blocked(key))
        .count();
    let false_positive_rate = if not_blocked.is_empty() {
        0.0
    } else {
        false_positives as f64 / not_blocked.len() as f64
    };

    Ok(VerificationReport {
        blocked_checked: blocked.len(),
        not_blocked_checked: not_blocked.len(),
        false_positives,
        false_positive_rate,
    })
}
