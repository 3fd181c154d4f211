//! The combine rule used when attributes are accumulated.
//!
//! Collections merge by union or concatenation, scalars by letting the
//! right-hand side win. Set-valued merges are associative and commutative,
//! so the order in which subspecs are visited does not change the result.

use std::collections::{BTreeMap, BTreeSet};

/// A binary combine rule for attribute values.
pub trait Merge {
    /// Combine `self` with `other`. `other` is the later declaration.
    fn merge(self, other: Self) -> Self;
}

impl<T: Ord> Merge for BTreeSet<T> {
    fn merge(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<T> Merge for Vec<T> {
    fn merge(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl<K: Ord, V: Merge> Merge for BTreeMap<K, V> {
    fn merge(mut self, other: Self) -> Self {
        for (key, value) in other {
            let merged = match self.remove(&key) {
                Some(existing) => existing.merge(value),
                None => value,
            };
            self.insert(key, merged);
        }
        self
    }
}

/// Override wins: a present right-hand value replaces the left.
impl<T> Merge for Option<T> {
    fn merge(self, other: Self) -> Self {
        other.or(self)
    }
}

impl Merge for bool {
    fn merge(self, other: Self) -> Self {
        self || other
    }
}
