//! Accumulator specifications: how a report turns records into per-key aggregates.
//!
//! A report is described by four functions over a record type `R`:
//!
//! - `filter` -- inclusion predicate (defaults to `true`)
//! - `key` -- grouping key, pure and deterministic
//! - `seed` -- accumulator for the first included record of a key
//! - `fold` -- update for every later included record of that key
//!
//! Accumulators implement [`Combine`] so that partial aggregations built on
//! different shards can be merged without changing the result.

use std::hash::Hash;
use std::sync::Arc;

/// Associative, commutative merge of two partial aggregates for the same key.
///
/// Implementations must satisfy, for all `a`, `b`, `c`:
/// - `a ⊕ (b ⊕ c) == (a ⊕ b) ⊕ c`
/// - `a ⊕ b == b ⊕ a` for every field that is not an identity field
///
/// Counters add, sets union, min/max select. Identity fields (names, locations)
/// keep the left-hand value, see [`First`](crate::combiners::First).
pub trait Combine {
    /// Fold `other` into `self`.
    fn combine(&mut self, other: Self);
}

/// Bound for grouping keys.
///
/// `Hash + Eq` route records to their accumulator; `Ord` is the final,
/// deterministic tie-break when ranking. The two must agree.
pub trait GroupKey: Eq + Hash + Ord + Clone + Send + 'static {}
impl<T> GroupKey for T where T: Eq + Hash + Ord + Clone + Send + 'static {}

/// Per-report definition of filter, key, seed and fold over records of type `R`.
///
/// Implementations must not mutate the record or any state outside the
/// accumulator being built. Violating the key contract (non-deterministic keys,
/// equality disagreeing with ordering) makes grouping and ranking undefined.
pub trait AccumulatorSpec<R>: Send + Sync {
    type Key: GroupKey;
    type Acc: Combine + Send;

    /// Whether `record` takes part in the aggregation.
    fn filter(&self, _record: &R) -> bool {
        true
    }

    fn key(&self, record: &R) -> Self::Key;

    fn seed(&self, record: &R) -> Self::Acc;

    fn fold(&self, record: &R, acc: &mut Self::Acc);
}

type FilterFn<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;
type KeyFn<R, K> = Arc<dyn Fn(&R) -> K + Send + Sync>;
type SeedFn<R, A> = Arc<dyn Fn(&R) -> A + Send + Sync>;
type FoldFn<R, A> = Arc<dyn Fn(&R, &mut A) + Send + Sync>;

/// Closure-backed [`AccumulatorSpec`].
///
/// # Example
/// ```
/// use flightrank::accumulator::FnSpec;
///
/// // words grouped by first letter, counting occurrences
/// let spec = FnSpec::lifted(
///     |w: &String| w.chars().next().unwrap_or(' '),
///     |_w: &String| 1u64,
/// )
/// .with_filter(|w: &String| !w.is_empty());
/// # let _ = spec;
/// ```
pub struct FnSpec<R, K, A> {
    filter: FilterFn<R>,
    key: KeyFn<R, K>,
    seed: SeedFn<R, A>,
    fold: FoldFn<R, A>,
}

impl<R, K, A> Clone for FnSpec<R, K, A> {
    fn clone(&self) -> Self {
        Self {
            filter: Arc::clone(&self.filter),
            key: Arc::clone(&self.key),
            seed: Arc::clone(&self.seed),
            fold: Arc::clone(&self.fold),
        }
    }
}

impl<R, K, A> FnSpec<R, K, A>
where
    R: 'static,
    K: GroupKey,
    A: Combine + Send + 'static,
{
    /// Build a spec from explicit key, seed and fold functions. Accepts every record.
    pub fn new<KF, SF, UF>(key: KF, seed: SF, fold: UF) -> Self
    where
        KF: Fn(&R) -> K + Send + Sync + 'static,
        SF: Fn(&R) -> A + Send + Sync + 'static,
        UF: Fn(&R, &mut A) + Send + Sync + 'static,
    {
        Self {
            filter: Arc::new(|_: &R| true),
            key: Arc::new(key),
            seed: Arc::new(seed),
            fold: Arc::new(fold),
        }
    }

    /// Build a spec whose fold is `acc.combine(project(record))`.
    ///
    /// Every record is projected into a one-record accumulator; folding and
    /// merging then use the same [`Combine`] rule, so the fold is associative
    /// by construction.
    pub fn lifted<KF, PF>(key: KF, project: PF) -> Self
    where
        KF: Fn(&R) -> K + Send + Sync + 'static,
        PF: Fn(&R) -> A + Send + Sync + 'static,
    {
        let project: SeedFn<R, A> = Arc::new(project);
        let seed = Arc::clone(&project);
        Self {
            filter: Arc::new(|_: &R| true),
            key: Arc::new(key),
            seed,
            fold: Arc::new(move |r: &R, acc: &mut A| acc.combine(project(r))),
        }
    }

    /// Replace the inclusion predicate.
    #[must_use]
    pub fn with_filter<F>(mut self, pred: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(pred);
        self
    }

    /// Keep only records accepted by both the current predicate and `pred`.
    #[must_use]
    pub fn and_filter<F>(mut self, pred: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        let current = Arc::clone(&self.filter);
        self.filter = Arc::new(move |r: &R| current(r) && pred(r));
        self
    }
}

impl<R, K, A> AccumulatorSpec<R> for FnSpec<R, K, A>
where
    K: GroupKey,
    A: Combine + Send,
{
    type Key = K;
    type Acc = A;

    fn filter(&self, record: &R) -> bool {
        (self.filter)(record)
    }

    fn key(&self, record: &R) -> K {
        (self.key)(record)
    }

    fn seed(&self, record: &R) -> A {
        (self.seed)(record)
    }

    fn fold(&self, record: &R, acc: &mut A) {
        (self.fold)(record, acc)
    }
}
