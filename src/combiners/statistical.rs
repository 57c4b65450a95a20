//! Statistical fields: `Mean`

use crate::accumulator::Combine;
use crate::derive::average;
use serde::{Deserialize, Serialize};

/* ===================== Mean ===================== */

/// Running mean kept as an integer sum and a count.
///
/// The average itself is derived on read, so merging stays exact and
/// associative. Empty means report `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mean {
    pub sum: i64,
    pub count: u64,
}

impl Mean {
    /// A single observation.
    #[must_use]
    pub const fn of(v: i64) -> Self {
        Self { sum: v, count: 1 }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        average(self.sum, self.count)
    }
}

impl Combine for Mean {
    fn combine(&mut self, other: Self) {
        self.sum += other.sum;
        self.count += other.count;
    }
}
