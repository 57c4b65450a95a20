//! Distinct-value fields: set union over `HashSet` and `BTreeSet`

use crate::accumulator::Combine;
use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

impl<T, S> Combine for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn combine(&mut self, other: Self) {
        if self.is_empty() {
            *self = other;
        } else {
            self.extend(other);
        }
    }
}

impl<T: Ord> Combine for BTreeSet<T> {
    fn combine(&mut self, mut other: Self) {
        if self.len() < other.len() {
            std::mem::swap(self, &mut other);
        }
        self.append(&mut other);
    }
}

/// Collections whose size is a distinct count.
///
/// Used by [`cardinality`](crate::derive::cardinality); the elements themselves
/// are never read back per element.
pub trait Distinct {
    fn distinct_len(&self) -> usize;
}

impl<T, S> Distinct for HashSet<T, S> {
    fn distinct_len(&self) -> usize {
        self.len()
    }
}

impl<T> Distinct for BTreeSet<T> {
    fn distinct_len(&self) -> usize {
        self.len()
    }
}
