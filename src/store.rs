//! Aggregation stores: the key → accumulator map built during one report run.
//!
//! A run moves through three states, enforced by ownership:
//!
//! 1. **Building** -- [`AggregationStore`] accepts [`put`](AggregationStore::put)
//!    and [`merge`](AggregationStore::merge).
//! 2. **Finalized** -- [`AggregationStore::finalize`] yields a read-only
//!    [`Finalized`] store; derived metrics are read from its accumulators.
//! 3. **Consumed** -- [`Finalized::rank`] consumes the store and hands the
//!    ordered rows to the caller.
//!
//! There is no way back from `Finalized` to `Building`, so ranking never sees
//! a partially aggregated view.
//!
//! # Sharding
//!
//! Stores built on disjoint shards of a record source merge into exactly the
//! store a single sequential fold would have produced, in any grouping, as
//! long as every accumulator field is combined by a [`Combine`] rule.
//!
//! ```
//! use flightrank::accumulator::FnSpec;
//! use flightrank::store::AggregationStore;
//!
//! let spec = FnSpec::lifted(|w: &&'static str| w.len(), |_: &&'static str| 1u64);
//! let words = ["a", "bb", "cc", "d", "eee"];
//!
//! let mut left = AggregationStore::new();
//! left.extend(&spec, &words[..2]);
//! let mut right = AggregationStore::new();
//! right.extend(&spec, &words[2..]);
//!
//! let merged = left.merge(right).finalize();
//! assert_eq!(merged.get(&1), Some(&2));
//! assert_eq!(merged.get(&2), Some(&2));
//! assert_eq!(merged.get(&3), Some(&1));
//! ```

use crate::accumulator::{AccumulatorSpec, Combine, GroupKey};
use crate::metrics::RunMetrics;
use crate::rank::{rank, Limit, RankStrategy, Ranking};
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::mem;

/// Key → accumulator map in the Building state.
#[derive(Clone, Debug)]
pub struct AggregationStore<K, A> {
    groups: HashMap<K, A>,
    seen: u64,
    included: u64,
    shards: usize,
}

impl<K: GroupKey, A: Combine> Default for AggregationStore<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: GroupKey, A: Combine> AggregationStore<K, A> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(groups: usize) -> Self {
        Self {
            groups: HashMap::with_capacity(groups),
            seen: 0,
            included: 0,
            shards: 1,
        }
    }

    /// Route one record through `filter` → `key` → `seed` (new key) or `fold`.
    ///
    /// Returns whether the record was included. The record is only borrowed
    /// for the duration of the call.
    pub fn put<R, S>(&mut self, spec: &S, record: &R) -> bool
    where
        S: AccumulatorSpec<R, Key = K, Acc = A> + ?Sized,
    {
        self.seen += 1;
        if !spec.filter(record) {
            return false;
        }
        self.included += 1;
        match self.groups.entry(spec.key(record)) {
            Entry::Occupied(mut e) => spec.fold(record, e.get_mut()),
            Entry::Vacant(e) => {
                e.insert(spec.seed(record));
            }
        }
        true
    }

    /// [`put`](Self::put) every record of `records`, in order.
    pub fn extend<R, S, I>(&mut self, spec: &S, records: I)
    where
        S: AccumulatorSpec<R, Key = K, Acc = A> + ?Sized,
        I: IntoIterator,
        I::Item: Borrow<R>,
    {
        for record in records {
            self.put(spec, record.borrow());
        }
    }

    /// [`put`](Self::put) every record of a fallible source.
    ///
    /// Stops at the first `Err` and returns it unchanged. The store keeps what
    /// was folded before the error; callers normally drop it.
    ///
    /// # Errors
    /// Whatever error the record source produced.
    pub fn try_extend<R, S, I, E>(&mut self, spec: &S, records: I) -> Result<(), E>
    where
        S: AccumulatorSpec<R, Key = K, Acc = A> + ?Sized,
        I: IntoIterator<Item = Result<R, E>>,
    {
        for record in records {
            self.put(spec, &record?);
        }
        Ok(())
    }

    /// Merge `other` into `self`.
    ///
    /// Keys present on one side only pass through unchanged; shared keys are
    /// combined as `self ⊕ other`, so identity fields of `self` win. The larger
    /// map absorbs the smaller one without changing that orientation.
    pub fn merge_from(&mut self, mut other: Self) {
        self.seen += other.seen;
        self.included += other.included;
        self.shards += other.shards;

        if self.groups.len() >= other.groups.len() {
            for (k, theirs) in other.groups {
                match self.groups.entry(k) {
                    Entry::Occupied(mut e) => e.get_mut().combine(theirs),
                    Entry::Vacant(e) => {
                        e.insert(theirs);
                    }
                }
            }
        } else {
            mem::swap(&mut self.groups, &mut other.groups);
            // `self.groups` now holds the right-hand side
            for (k, ours) in other.groups {
                match self.groups.entry(k) {
                    Entry::Occupied(mut e) => {
                        let theirs = mem::replace(e.get_mut(), ours);
                        e.get_mut().combine(theirs);
                    }
                    Entry::Vacant(e) => {
                        e.insert(ours);
                    }
                }
            }
        }
    }

    /// Merge two stores into a new one (`self ⊕ other`).
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.merge_from(other);
        self
    }

    /// Reduce shard stores into one, preserving shard order.
    ///
    /// With `fanout = None` (or `Some(0 | 1)`) the stores are merged left to
    /// right. With `Some(n)`, adjacent groups of at most `n` stores are merged
    /// per round until one remains. Both shapes give the same store.
    #[must_use]
    pub fn merge_all(stores: Vec<Self>, fanout: Option<usize>) -> Self {
        let mut round = stores;
        match fanout {
            Some(n) if n >= 2 => {
                while round.len() > 1 {
                    tracing::debug!(stores = round.len(), fanout = n, "merge round");
                    let mut next = Vec::with_capacity(round.len().div_ceil(n));
                    let mut it = round.into_iter().peekable();
                    while it.peek().is_some() {
                        let group = it.by_ref().take(n);
                        next.push(Self::fold_left(group));
                    }
                    round = next;
                }
                round.pop().unwrap_or_default()
            }
            _ => Self::fold_left(round),
        }
    }

    fn fold_left(stores: impl IntoIterator<Item = Self>) -> Self {
        let mut it = stores.into_iter();
        let Some(mut acc) = it.next() else {
            return Self::new();
        };
        for s in it {
            acc.merge_from(s);
        }
        acc
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&A> {
        self.groups.get(key)
    }

    #[must_use]
    pub const fn records_seen(&self) -> u64 {
        self.seen
    }

    #[must_use]
    pub const fn records_included(&self) -> u64 {
        self.included
    }

    /// Close the Building state.
    #[must_use]
    pub fn finalize(self) -> Finalized<K, A> {
        let metrics = RunMetrics {
            records_seen: self.seen,
            records_included: self.included,
            groups: self.groups.len(),
            shards: self.shards,
            elapsed: None,
        };
        Finalized {
            groups: self.groups,
            metrics,
        }
    }
}

/// Read-only store in the Finalized state.
#[derive(Clone, Debug)]
pub struct Finalized<K, A> {
    groups: HashMap<K, A>,
    metrics: RunMetrics,
}

impl<K: GroupKey, A> Finalized<K, A> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&A> {
        self.groups.get(key)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &A)> {
        self.groups.iter()
    }

    #[must_use]
    pub const fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: std::time::Duration) {
        self.metrics.elapsed = Some(elapsed);
    }

    /// All entries, sorted by key.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, A)> {
        let mut v: Vec<(K, A)> = self.groups.into_iter().collect();
        v.sort_by(|a, b| a.0.cmp(&b.0));
        v
    }

    /// Rank all entries and keep the first `limit` (full sort, then truncate).
    #[must_use]
    pub fn rank(self, ranking: &Ranking<K, A>, limit: Limit) -> Vec<(K, A)> {
        self.rank_with(ranking, limit, RankStrategy::FullSort)
    }

    /// [`rank`](Self::rank) with an explicit extraction strategy.
    #[must_use]
    pub fn rank_with(self, ranking: &Ranking<K, A>, limit: Limit, strategy: RankStrategy) -> Vec<(K, A)> {
        rank(self.groups.into_iter().collect(), ranking, limit, strategy)
    }
}
