//! Metric derivation: secondary values computed from raw counters on read.
//!
//! Derived metrics are never stored in an aggregation store. A rate is not
//! combinable across shards, but its numerator and denominator are, so the
//! store keeps the counters and these functions turn them into metrics when
//! a report reads them.
//!
//! Degenerate denominators are not errors: a key with zero flights has a
//! cancellation rate of `0.0`, never `NaN`. Every rate in the crate goes
//! through [`rate`] so the policy is the same for every report and ranking.

use crate::combiners::Distinct;

/// `numerator / denominator` in `[0, 1]` for counters where `numerator <= denominator`.
///
/// Returns `0.0` when `denominator == 0`.
///
/// ```
/// use flightrank::derive::rate;
///
/// assert_eq!(rate(0, 0), 0.0);
/// assert_eq!(rate(7, 7), 1.0);
/// assert_eq!(rate(1, 4), 0.25);
/// ```
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Arithmetic mean of `count` observations summing to `sum`; `0.0` when `count == 0`.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(sum: i64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Number of distinct values in a set field.
#[inline]
#[must_use]
pub fn cardinality<S: Distinct + ?Sized>(set: &S) -> usize {
    set.distinct_len()
}
