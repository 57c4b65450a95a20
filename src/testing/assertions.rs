//! Assertion functions for comparing aggregation and ranking outputs.

use crate::accumulator::GroupKey;
use crate::store::Finalized;
use std::fmt::Debug;

/// Assert that two row sets are equal in order and content.
///
/// # Panics
///
/// Panics if the rows differ in length or at any index.
///
/// # Example
///
/// ```
/// use flightrank::testing::assert_rows_equal;
///
/// assert_rows_equal(&[("IAH", 3)], &[("IAH", 3)]);
/// ```
pub fn assert_rows_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Row count mismatch:\n  Expected: {}\n  Actual: {}\n  Expected rows: {expected:?}\n  Actual rows: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Row mismatch at rank {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two key-value row sets are equal after sorting by key.
///
/// # Panics
///
/// Panics if the rows differ after sorting by key.
///
/// # Example
///
/// ```
/// use flightrank::testing::assert_kv_rows_equal;
///
/// assert_kv_rows_equal(vec![("b", 2), ("a", 1)], vec![("a", 1), ("b", 2)]);
/// ```
pub fn assert_kv_rows_equal<K, V>(mut actual: Vec<(K, V)>, mut expected: Vec<(K, V)>)
where
    K: Debug + Ord,
    V: Debug + PartialEq,
{
    actual.sort_by(|a, b| a.0.cmp(&b.0));
    expected.sort_by(|a, b| a.0.cmp(&b.0));
    assert_rows_equal(&actual, &expected);
}

/// Assert that two finalized stores hold the same keys with equal accumulators.
///
/// Run counters (records seen, shards) are not compared.
///
/// # Panics
///
/// Panics if the key sets differ or any accumulator differs.
pub fn assert_stores_equal<K, A>(actual: Finalized<K, A>, expected: Finalized<K, A>)
where
    K: GroupKey + Debug,
    A: Debug + PartialEq,
{
    assert_rows_equal(&actual.into_entries(), &expected.into_entries());
}

/// Assert that a float metric is within `eps` of `expected`.
///
/// # Panics
///
/// Panics if `|actual - expected| > eps`.
pub fn assert_metric_near(actual: f64, expected: f64, eps: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= eps,
        "Metric mismatch:\n  Expected: {expected}\n  Actual: {actual}\n  Diff: {diff} > {eps}"
    );
}
