//! Base-reset policy
//!
//! Stashes are computed against a base generation. Once the drift from that
//! base exceeds the threshold, clients are better served by a fresh full
//! filter.

use super::diff::diff;
use super::key::Key;

/// Default drift (added + removed keys) tolerated before a new base is needed
pub const BASE_REPLACE_THRESHOLD: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseResetPolicy {
    threshold: usize,
}

impl Default for BaseResetPolicy {
    fn default() -> Self {
        Self::new(BASE_REPLACE_THRESHOLD)
    }
}

impl BaseResetPolicy {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// `true` when the base must be replaced
    ///
    /// A missing base snapshot (`None`) always requires a reset.
    pub fn should_reset(&self, current: &[Key], base: Option<&[Key]>) -> bool {
        match base {
            None => true,
            Some(base) => diff(base, current).len() > self.threshold,
        }
    }
}
