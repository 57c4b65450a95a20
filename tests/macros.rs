//! Common test macros.

/// Check that a derived metric is within an acceptable tolerance.
///
/// # Usage
/// ```
/// assert_approx_eq!(actual, expected);
/// assert_approx_eq!(actual, expected, epsilon);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr) => {
        assert_approx_eq!($actual, $expected, 1e-10)
    };
    ($actual:expr, $expected:expr, $epsilon:expr) => {
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        let epsilon: f64 = $epsilon;
        let diff = (actual - expected).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n   eps: `{:?}`",
            actual,
            expected,
            diff,
            epsilon
        );
    };
}

/// Check the keys of ranked rows, in order.
///
/// # Usage
/// ```
/// assert_ranked_keys!(rows, ["AA", "UA"]);
/// ```
#[macro_export]
macro_rules! assert_ranked_keys {
    ($rows:expr, [$($key:expr),* $(,)?]) => {
        let keys: Vec<_> = $rows.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, [$($key),*], "ranked keys differ");
    };
}
