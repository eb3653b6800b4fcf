use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Screen catalog
// ============================================================================

/// Display name used for screens that were never declared in the states section.
pub const UNKNOWN_SCREEN: &str = "Unknown Screen";

/// Every screen hash seen in a graph, with its declared name if any.
///
/// Keyed by hash in a `BTreeMap`, so iteration is always in ascending
/// lexicographic hash order. Canonical screen ids rely on that.
pub type ScreenNames = BTreeMap<String, Option<String>>;

// ============================================================================
// Canonical identifiers
// ============================================================================

/// A short, run-scoped substitute for an opaque 64-hex hash.
///
/// Ids are 1-based ordinals rendered with a one-letter prefix (`S3`, `T12`).
/// Ordering is numeric, so `T2 < T10`.
pub trait CanonicalId: Copy + Ord + fmt::Display + FromStr<Err = ParseIdError> {
    const PREFIX: char;

    fn from_ordinal(ordinal: u32) -> Self;

    fn ordinal(self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a canonical id")]
pub struct ParseIdError(pub String);

macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl CanonicalId for $name {
            const PREFIX: char = $prefix;

            fn from_ordinal(ordinal: u32) -> Self {
                Self(ordinal)
            }

            fn ordinal(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_ordinal(s, $prefix).map(Self).ok_or_else(|| ParseIdError(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

canonical_id!(
    /// `S<n>`: assigned in ascending hash order.
    ScreenId,
    'S'
);

canonical_id!(
    /// `T<n>`: assigned in order of first appearance in the transitions section.
    TransitionId,
    'T'
);

/// Accepts exactly the strings `Display` produces: prefix, then a positive
/// decimal ordinal without leading zeros.
fn parse_ordinal(s: &str, prefix: char) -> Option<u32> {
    let digits = s.strip_prefix(prefix)?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// ============================================================================
// Bidirectional id map
// ============================================================================

/// Bijection between canonical ids and the hashes they stand for.
///
/// Ids are handed out densely from 1 in call order of [`IdMap::assign`];
/// assigning an already known hash returns its existing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMap<I> {
    by_id: BTreeMap<I, String>,
    by_hash: HashMap<String, I>,
}

impl<I: CanonicalId> Default for IdMap<I> {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
            by_hash: HashMap::new(),
        }
    }
}

impl<I: CanonicalId> IdMap<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `hash`, minting the next ordinal if it is new.
    pub fn assign(&mut self, hash: &str) -> I {
        if let Some(id) = self.by_hash.get(hash) {
            return *id;
        }
        let id = I::from_ordinal(self.by_id.len() as u32 + 1);
        self.by_id.insert(id, hash.to_string());
        self.by_hash.insert(hash.to_string(), id);
        id
    }

    pub fn hash_of(&self, id: I) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn id_of(&self, hash: &str) -> Option<I> {
        self.by_hash.get(hash).copied()
    }

    /// Look up a textual id such as `"T4"`. Tokens that do not parse back to
    /// the exact same id (`"T04"`, `"T0"`) are unknown.
    pub fn hash_of_token(&self, token: &str) -> Option<&str> {
        token.parse::<I>().ok().and_then(|id| self.hash_of(id))
    }

    /// Canonical id for `hash` rendered as text, or the raw hash when it was
    /// never assigned.
    pub fn resolve(&self, hash: &str) -> String {
        match self.id_of(hash) {
            Some(id) => id.to_string(),
            None => hash.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &str)> {
        self.by_id.iter().map(|(id, hash)| (*id, hash.as_str()))
    }
}

impl<I: CanonicalId + Serialize> Serialize for IdMap<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.by_id.iter())
    }
}
