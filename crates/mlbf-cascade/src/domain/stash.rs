//! Incremental stash between two generations

use serde::{Deserialize, Serialize};

use super::diff::{diff, KeyDiff};
use super::key::Key;

/// Keys newly blocked and newly unblocked since a reference generation
///
/// Serialized as `{"blocked": [...], "unblocked": [...]}` with sorted lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stash {
    pub blocked: Vec<Key>,
    pub unblocked: Vec<Key>,
}

impl Stash {
    /// Stash taking `previous` blocked keys to `current` blocked keys
    pub fn between(previous: &[Key], current: &[Key]) -> Self {
        Self::from(diff(previous, current))
    }

    pub fn len(&self) -> usize {
        self.blocked.len() + self.unblocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty() && self.unblocked.is_empty()
    }
}

impl From<KeyDiff> for Stash {
    fn from(diff: KeyDiff) -> Self {
        Self {
            blocked: diff.extras.into_iter().collect(),
            unblocked: diff.deletes.into_iter().collect(),
        }
    }
}
