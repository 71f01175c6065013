//! Items
//!
//! Item names are compared in their normalised form: trimmed and lowercased.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

/// Normalise a raw item name by trimming surrounding whitespace and lowercasing it.
pub fn normalize_item_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A sorted, deduplicated set of normalised item names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemSet {
    items: SmallVec<[String; 5]>,
}

impl ItemSet {
    /// Create a new item set, normalising each name and discarding blanks.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: SmallVec<[String; 5]> = names
            .into_iter()
            .map(|name| normalize_item_name(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();

        items.sort();
        items.dedup();

        Self { items }
    }

    /// Create a new item set from string slices.
    pub fn from_strs(names: &[&str]) -> Self {
        Self::new(names.iter().copied())
    }

    /// Check whether the set contains the given (already normalised) name.
    pub fn contains(&self, name: &str) -> bool {
        self.items
            .binary_search_by(|item| item.as_str().cmp(name))
            .is_ok()
    }

    /// Iterate over the names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.items.join(", "))
    }
}
