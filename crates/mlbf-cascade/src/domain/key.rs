//! Canonical filter keys
//!
//! A key is the `{guid}:{version}` rendering of one (identifier, version) pair.
//! Encoding is total and deterministic. A guid that itself contains the
//! separator can collide with another pair; identifiers are constrained
//! upstream and this is not guarded here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between identifier and version
pub const KEY_SEPARATOR: char = ':';

/// One software identifier at one version
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionPair {
    pub guid: String,
    pub version: String,
}

impl VersionPair {
    pub fn new(guid: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            version: version.into(),
        }
    }

    /// Canonical key for this pair
    pub fn key(&self) -> Key {
        encode_key(&self.guid, &self.version)
    }
}

impl<G: Into<String>, V: Into<String>> From<(G, V)> for VersionPair {
    fn from((guid, version): (G, V)) -> Self {
        Self::new(guid, version)
    }
}

/// Canonical, comparable key for a (guid, version) pair
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Wrap an already-canonical key string (e.g. read back from a snapshot)
    pub fn from_canonical(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Encode a single (guid, version) pair
pub fn encode_key(guid: &str, version: &str) -> Key {
    let mut raw = String::with_capacity(guid.len() + version.len() + 1);
    raw.push_str(guid);
    raw.push(KEY_SEPARATOR);
    raw.push_str(version);
    Key(raw)
}

/// Encode a sequence of pairs, preserving order and duplicates
pub fn encode_keys<'a, I>(pairs: I) -> Vec<Key>
where
    I: IntoIterator<Item = &'a VersionPair>,
{
    pairs
        .into_iter()
        .map(|pair| encode_key(&pair.guid, &pair.version))
        .collect()
}
