//! Symmetric difference between two blocked-key snapshots

use std::collections::{BTreeSet, HashSet};

use super::key::Key;

/// Keys added to and removed from a snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyDiff {
    /// `current - previous`
    pub extras: BTreeSet<Key>,
    /// `previous - current`
    pub deletes: BTreeSet<Key>,
}

impl KeyDiff {
    /// Number of keys that changed in either direction
    pub fn len(&self) -> usize {
        self.extras.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extras.is_empty() && self.deletes.is_empty()
    }
}

/// Compute `(current - previous, previous - current)`
///
/// Duplicates and input order are irrelevant.
pub fn diff<'a, P, C>(previous: P, current: C) -> KeyDiff
where
    P: IntoIterator<Item = &'a Key>,
    C: IntoIterator<Item = &'a Key>,
{
    let previous: HashSet<&Key> = previous.into_iter().collect();
    let current: HashSet<&Key> = current.into_iter().collect();

    KeyDiff {
        extras: current.difference(&previous).map(|k| (*k).clone()).collect(),
        deletes: previous.difference(&current).map(|k| (*k).clone()).collect(),
    }
}
