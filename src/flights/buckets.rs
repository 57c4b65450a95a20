//! Range buckets for distance and aircraft-age reports.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open range `[lo, hi)`; `hi = None` is unbounded.
///
/// Serialized as a two-element array, `[500, 1000]` or `[2000, null]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, Option<u32>)", into = "(u32, Option<u32>)")]
pub struct Bucket {
    pub lo: u32,
    pub hi: Option<u32>,
}

impl Bucket {
    #[must_use]
    pub const fn new(lo: u32, hi: Option<u32>) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub fn contains(&self, v: u32) -> bool {
        v >= self.lo && self.hi.is_none_or(|hi| v < hi)
    }
}

impl From<(u32, Option<u32>)> for Bucket {
    fn from((lo, hi): (u32, Option<u32>)) -> Self {
        Self { lo, hi }
    }
}

impl From<Bucket> for (u32, Option<u32>) {
    fn from(b: Bucket) -> Self {
        (b.lo, b.hi)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hi {
            Some(hi) => write!(f, "{}-{}", self.lo, hi.saturating_sub(1)),
            None => write!(f, "{}+", self.lo),
        }
    }
}

/// Ordered, non-overlapping buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct BucketSet {
    buckets: Vec<Bucket>,
}

impl BucketSet {
    /// Validate and sort `buckets`.
    ///
    /// # Errors
    /// An empty range (`hi <= lo`) or two overlapping ranges.
    pub fn new(mut buckets: Vec<Bucket>) -> Result<Self> {
        buckets.sort();
        for b in &buckets {
            if b.hi.is_some_and(|hi| hi <= b.lo) {
                bail!("empty bucket {b:?}");
            }
        }
        for w in buckets.windows(2) {
            match w[0].hi {
                Some(hi) if hi <= w[1].lo => {}
                _ => bail!("overlapping buckets {:?} and {:?}", w[0], w[1]),
            }
        }
        Ok(Self { buckets })
    }

    /// Consecutive buckets between ascending `edges`, the last one unbounded.
    ///
    /// `from_edges(&[0, 500, 1000])` gives `[0,500) [500,1000) [1000,∞)`.
    /// Unsorted or duplicate edges are sorted and deduplicated first.
    #[must_use]
    pub fn from_edges(edges: &[u32]) -> Self {
        let mut edges = edges.to_vec();
        edges.sort_unstable();
        edges.dedup();
        let buckets = edges
            .iter()
            .enumerate()
            .map(|(i, &lo)| Bucket::new(lo, edges.get(i + 1).copied()))
            .collect();
        Self { buckets }
    }

    /// The bucket containing `v`, if any.
    #[must_use]
    pub fn locate(&self, v: u32) -> Option<Bucket> {
        let i = self.buckets.partition_point(|b| b.lo <= v);
        let b = self.buckets.get(i.checked_sub(1)?)?;
        b.contains(v).then_some(*b)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }
}

impl TryFrom<Vec<Bucket>> for BucketSet {
    type Error = anyhow::Error;

    fn try_from(v: Vec<Bucket>) -> Result<Self> {
        Self::new(v)
    }
}

impl From<BucketSet> for Vec<Bucket> {
    fn from(s: BucketSet) -> Self {
        s.buckets
    }
}
