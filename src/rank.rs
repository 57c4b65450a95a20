//! Ranking and Top-K extraction over finalized aggregation stores.
//!
//! A [`Ranking`] is a comparator over `(key, accumulator)` entries. Ranking a
//! store materializes every group, orders it by the comparator and keeps the
//! first [`Limit`] entries. Ties are always broken by ascending key, so the
//! output never depends on hash-map iteration order and repeated runs over the
//! same input return the same rows.
//!
//! ## Standard rankings
//! - [`Ranking::by_count_desc`] / [`Ranking::by_count_asc`] -- raw counters
//! - [`Ranking::by_metric_desc`] / [`Ranking::by_metric_asc`] -- derived `f64` metrics (rates, averages)
//! - [`Ranking::natural_key`] -- plain listing in key order
//! - [`Ranking::by_distance_from`] -- proximity to a reference point, with a caller-supplied distance
//!
//! ## Example
//! ```
//! use flightrank::rank::{rank, Limit, RankStrategy, Ranking};
//!
//! let entries = vec![("ORD", 12u64), ("IAH", 30), ("DFW", 30), ("SFO", 5)];
//! let busiest = Ranking::by_count_desc(|n: &u64| *n);
//!
//! let top = rank(entries, &busiest, Limit::Top(3), RankStrategy::FullSort);
//! assert_eq!(top, vec![("DFW", 30), ("IAH", 30), ("ORD", 12)]);
//! ```

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

type Cmp<K, A> = Arc<dyn Fn((&K, &A), (&K, &A)) -> Ordering + Send + Sync>;

/// Comparator over `(key, accumulator)` entries. Must be a strict weak ordering.
pub struct Ranking<K, A> {
    cmp: Cmp<K, A>,
}

impl<K, A> Clone for Ranking<K, A> {
    fn clone(&self) -> Self {
        Self {
            cmp: Arc::clone(&self.cmp),
        }
    }
}

impl<K: 'static, A: 'static> Ranking<K, A> {
    /// Wrap an arbitrary comparator.
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn((&K, &A), (&K, &A)) -> Ordering + Send + Sync + 'static,
    {
        Self { cmp: Arc::new(cmp) }
    }

    /// Highest counter first.
    pub fn by_count_desc<F>(count: F) -> Self
    where
        F: Fn(&A) -> u64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| count(b.1).cmp(&count(a.1)))
    }

    /// Lowest counter first.
    pub fn by_count_asc<F>(count: F) -> Self
    where
        F: Fn(&A) -> u64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| count(a.1).cmp(&count(b.1)))
    }

    /// Highest derived metric first. Floats are compared with a total order.
    pub fn by_metric_desc<F>(metric: F) -> Self
    where
        F: Fn(&A) -> f64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| OrderedFloat(metric(b.1)).cmp(&OrderedFloat(metric(a.1))))
    }

    /// Lowest derived metric first.
    pub fn by_metric_asc<F>(metric: F) -> Self
    where
        F: Fn(&A) -> f64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| OrderedFloat(metric(a.1)).cmp(&OrderedFloat(metric(b.1))))
    }

    /// Nearest to `origin` first.
    ///
    /// `locate` gives an entry's position, `distance` the distance between two
    /// positions; the engine implements neither. Entries without a position
    /// sort after every located entry.
    pub fn by_distance_from<P, L, D>(origin: P, locate: L, distance: D) -> Self
    where
        P: Send + Sync + 'static,
        L: Fn(&K, &A) -> Option<P> + Send + Sync + 'static,
        D: Fn(&P, &P) -> f64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| {
            let da = locate(a.0, a.1).map(|p| OrderedFloat(distance(&origin, &p)));
            let db = locate(b.0, b.1).map(|p| OrderedFloat(distance(&origin, &p)));
            match (da, db) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    }

    /// Reverse the comparator. The key tie-break stays ascending.
    #[must_use]
    pub fn reversed(self) -> Self {
        let cmp = self.cmp;
        Self::new(move |a, b| cmp(b, a))
    }

    /// Break ties of `self` with `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        let (first, second) = (self.cmp, next.cmp);
        Self::new(move |a, b| first(a, b).then_with(|| second(a, b)))
    }

    #[must_use]
    pub fn compare(&self, a: (&K, &A), b: (&K, &A)) -> Ordering {
        (self.cmp)(a, b)
    }
}

impl<K: Ord + 'static, A: 'static> Ranking<K, A> {
    /// Ascending key order, for listing reports.
    #[must_use]
    pub fn natural_key() -> Self {
        Self::new(|a, b| a.0.cmp(b.0))
    }
}

/// How many ranked entries to return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    /// Every entry.
    #[default]
    All,
    /// At most `n` entries.
    Top(usize),
}

impl Limit {
    /// `None` means unbounded; any `n <= 0` yields an empty result.
    #[must_use]
    pub fn from_signed(n: Option<i64>) -> Self {
        match n {
            None => Self::All,
            Some(n) if n <= 0 => Self::Top(0),
            Some(n) => Self::Top(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    /// Number of rows to return out of `total`.
    #[must_use]
    pub fn resolve(self, total: usize) -> usize {
        match self {
            Self::All => total,
            Self::Top(n) => n.min(total),
        }
    }
}

/// Top-K extraction strategy. Both return identical rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStrategy {
    /// Sort every entry, then truncate.
    #[default]
    FullSort,
    /// Partition around the `n`-th entry, then sort only the first `n`.
    /// Cheaper than a full sort when `n` is much smaller than the group count.
    Select,
}

/// Order `entries` by `ranking` (ties by ascending key) and keep the first `limit`.
///
/// Entries that still compare equal, such as duplicate keys, keep their input
/// order under either strategy. Returns an empty vector for empty input or
/// `Limit::Top(0)`.
#[must_use]
pub fn rank<K: Ord, A>(
    entries: Vec<(K, A)>,
    ranking: &Ranking<K, A>,
    limit: Limit,
    strategy: RankStrategy,
) -> Vec<(K, A)> {
    let n = limit.resolve(entries.len());
    if n == 0 {
        return Vec::new();
    }

    let mut indexed: Vec<(usize, (K, A))> = entries.into_iter().enumerate().collect();
    let total = |(i, a): &(usize, (K, A)), (j, b): &(usize, (K, A))| {
        (ranking.cmp)((&a.0, &a.1), (&b.0, &b.1))
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| i.cmp(j))
    };

    match strategy {
        RankStrategy::FullSort => {
            indexed.sort_by(|a, b| total(a, b));
            indexed.truncate(n);
        }
        RankStrategy::Select => {
            if n < indexed.len() {
                indexed.select_nth_unstable_by(n - 1, |a, b| total(a, b));
                indexed.truncate(n);
            }
            indexed.sort_by(|a, b| total(a, b));
        }
    }
    tracing::trace!(rows = indexed.len(), ?strategy, "ranked");
    indexed.into_iter().map(|(_, entry)| entry).collect()
}
