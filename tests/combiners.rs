use anyhow::Result;
use flightrank::accumulator::Combine;
use flightrank::combiners::{First, Max, Mean, Min};
use flightrank::derive::{average, cardinality, rate};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

mod macros;

type Acc = (u64, Min<i32>, Max<i32>, Mean, BTreeSet<u8>);

fn of(v: i32) -> (u64, (Min<i32>, Max<i32>, Mean), HashSet<u8>) {
    (1, (Min::of(v), Max::of(v), Mean::of(i64::from(v))), HashSet::from([v.rem_euclid(7) as u8]))
}

fn combined<T: Combine>(mut a: T, b: T) -> T {
    a.combine(b);
    a
}

proptest! {
    #[test]
    fn combine_is_associative_and_commutative(a in -500i32..500, b in -500i32..500, c in -500i32..500) {
        let left = combined(combined(of(a), of(b)), of(c));
        let right = combined(of(a), combined(of(b), of(c)));
        let swapped = combined(of(b), combined(of(c), of(a)));
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(&left, &swapped);
    }

    #[test]
    fn mean_matches_direct_average(values in prop::collection::vec(-1000i64..1000, 1..50)) {
        let merged = values.iter().map(|v| Mean::of(*v)).reduce(combined).unwrap_or_default();
        let direct = values.iter().sum::<i64>() as f64 / values.len() as f64;
        prop_assert!((merged.value() - direct).abs() < 1e-9);
        prop_assert_eq!(merged.count, values.len() as u64);
    }
}

#[test]
fn min_and_max_ignore_empty_sides() -> Result<()> {
    assert_eq!(combined(Min::default(), Min::of(4)).get(), Some(&4));
    assert_eq!(combined(Min::of(4), Min::default()).get(), Some(&4));
    assert_eq!(combined(Min::of(4), Min::of(-2)).get(), Some(&-2));
    assert_eq!(combined(Max::of(4), Max::of(-2)).get(), Some(&4));
    assert_eq!(combined(Max::<i32>::default(), Max::default()).get(), None);
    Ok(())
}

#[test]
fn first_keeps_the_left_value() -> Result<()> {
    assert_eq!(combined(First::of("United"), First::of("Other")).get(), Some(&"United"));
    assert_eq!(combined(First::default(), First::of("Other")).get(), Some(&"Other"));
    assert_eq!(combined(First::of("United"), First::default()).get(), Some(&"United"));
    Ok(())
}

#[test]
fn option_and_tuples_combine_field_wise() -> Result<()> {
    assert_eq!(combined(None, Some(3u64)), Some(3));
    assert_eq!(combined(Some(2u64), Some(3)), Some(5));
    assert_eq!(combined(Some(2u64), None), Some(2));

    let a: Acc = (2, Min::of(5), Max::of(5), Mean { sum: 10, count: 2 }, BTreeSet::from([1, 2]));
    let b: Acc = (1, Min::of(-1), Max::of(9), Mean::of(-1), BTreeSet::from([2, 3, 4]));
    let (n, lo, hi, mean, seen) = combined(a, b);
    assert_eq!(n, 3);
    assert_eq!(lo.get(), Some(&-1));
    assert_eq!(hi.get(), Some(&9));
    assert_approx_eq!(mean.value(), 3.0);
    assert_eq!(cardinality(&seen), 4);
    Ok(())
}

#[test]
fn set_union_counts_each_value_once() -> Result<()> {
    let hs = combined(HashSet::from(["IAH", "ORD"]), HashSet::from(["ORD", "DFW"]));
    assert_eq!(cardinality(&hs), 3);
    let empty_left = combined(HashSet::new(), HashSet::from(["SFO"]));
    assert_eq!(cardinality(&empty_left), 1);

    let small_left = combined(BTreeSet::from([1]), BTreeSet::from([1, 2, 3]));
    assert_eq!(small_left, BTreeSet::from([1, 2, 3]));
    Ok(())
}

#[test]
fn rates_handle_zero_denominators() -> Result<()> {
    assert_eq!(rate(0, 0), 0.0);
    assert_eq!(rate(5, 0), 0.0);
    for k in [1u64, 2, 17, 1_000_000] {
        assert_eq!(rate(k, k), 1.0);
    }
    assert_approx_eq!(rate(4, 20), 0.2);
    assert!(!rate(0, 0).is_nan());

    assert_eq!(average(0, 0), 0.0);
    assert_approx_eq!(average(-9, 4), -2.25);
    assert_approx_eq!(Mean::default().value(), 0.0);
    Ok(())
}
