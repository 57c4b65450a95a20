//! Basic combinable fields: counters, Min, Max, First, Option and tuples

use crate::accumulator::Combine;
use serde::{Deserialize, Serialize};

/* ===================== counters ===================== */

macro_rules! impl_counter_combine {
    ($($t:ty),* $(,)?) => {
        $(
            impl Combine for $t {
                #[inline]
                fn combine(&mut self, other: Self) {
                    *self += other;
                }
            }
        )*
    };
}

// Integer addition only: float addition is not associative.
impl_counter_combine!(u8, u16, u32, u64, u128, usize, i32, i64, i128);

/* ===================== Min<T> ===================== */

/// Smallest value seen for a key (requires `Ord`).
///
/// `Min(None)` is the identity of the combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Min<T>(pub Option<T>);

impl<T> Min<T> {
    /// A single observation.
    pub const fn of(v: T) -> Self {
        Self(Some(v))
    }

    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T: Ord> Combine for Min<T> {
    fn combine(&mut self, other: Self) {
        if let Some(b) = other.0 {
            match &mut self.0 {
                Some(a) => {
                    if b < *a {
                        *a = b
                    }
                }
                None => self.0 = Some(b),
            }
        }
    }
}

/* ===================== Max<T> ===================== */

/// Largest value seen for a key (requires `Ord`).
///
/// `Max(None)` is the identity of the combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Max<T>(pub Option<T>);

impl<T> Max<T> {
    /// A single observation.
    pub const fn of(v: T) -> Self {
        Self(Some(v))
    }

    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T: Ord> Combine for Max<T> {
    fn combine(&mut self, other: Self) {
        if let Some(b) = other.0 {
            match &mut self.0 {
                Some(a) => {
                    if b > *a {
                        *a = b
                    }
                }
                None => self.0 = Some(b),
            }
        }
    }
}

/* ===================== First<T> ===================== */

/// Identity field of an accumulator (a carrier name, an airport location).
///
/// Combining keeps the left-hand value when both sides are set ("first writer
/// wins"). This is associative, and commutative whenever both sides agree; a
/// disagreement is a data-quality problem in the caller's reference data and is
/// reported through `tracing` rather than failing the run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct First<T>(pub Option<T>);

impl<T> First<T> {
    pub const fn of(v: T) -> Self {
        Self(Some(v))
    }

    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T: PartialEq + std::fmt::Debug> Combine for First<T> {
    fn combine(&mut self, other: Self) {
        let Some(theirs) = other.0 else { return };
        match self.0.as_ref() {
            Some(ours) => {
                if *ours != theirs {
                    tracing::warn!(
                        kept = ?ours,
                        dropped = ?theirs,
                        "conflicting identity values for one key; keeping the first"
                    );
                }
            }
            None => self.0 = Some(theirs),
        }
    }
}

/* ===================== Option<T> ===================== */

impl<T: Combine> Combine for Option<T> {
    fn combine(&mut self, other: Self) {
        let Some(b) = other else { return };
        match self {
            Some(a) => a.combine(b),
            None => *self = Some(b),
        }
    }
}

/* ===================== tuples ===================== */

impl<A: Combine, B: Combine> Combine for (A, B) {
    fn combine(&mut self, other: Self) {
        self.0.combine(other.0);
        self.1.combine(other.1);
    }
}

impl<A: Combine, B: Combine, C: Combine> Combine for (A, B, C) {
    fn combine(&mut self, other: Self) {
        self.0.combine(other.0);
        self.1.combine(other.1);
        self.2.combine(other.2);
    }
}
