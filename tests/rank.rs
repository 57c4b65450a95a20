use anyhow::Result;
use flightrank::rank::{rank, Limit, RankStrategy, Ranking};
use proptest::prelude::*;
use std::cmp::Ordering;

mod macros;

fn by_count() -> Ranking<u16, u64> {
    Ranking::by_count_desc(|n: &u64| *n)
}

fn entries(counts: &[(u16, u64)]) -> Vec<(u16, u64)> {
    counts.to_vec()
}

proptest! {
    #[test]
    fn top_n_is_a_prefix_of_the_full_ranking(
        counts in prop::collection::btree_map(any::<u16>(), 0u64..20, 0..60),
        n in 0usize..80,
    ) {
        let all: Vec<(u16, u64)> = counts.into_iter().collect();
        let full = rank(all.clone(), &by_count(), Limit::All, RankStrategy::FullSort);
        let top = rank(all.clone(), &by_count(), Limit::Top(n), RankStrategy::FullSort);
        let selected = rank(all.clone(), &by_count(), Limit::Top(n), RankStrategy::Select);

        prop_assert_eq!(full.len(), all.len());
        prop_assert_eq!(top.len(), n.min(all.len()));
        prop_assert_eq!(&top[..], &full[..top.len()]);
        prop_assert_eq!(&selected, &top);
        for w in full.windows(2) {
            prop_assert!(w[0].1 > w[1].1 || (w[0].1 == w[1].1 && w[0].0 < w[1].0));
        }
    }
}

#[test]
fn ties_break_by_ascending_key() -> Result<()> {
    let rows = rank(
        entries(&[(30, 2), (10, 2), (20, 2), (5, 1)]),
        &by_count(),
        Limit::All,
        RankStrategy::FullSort,
    );
    assert_ranked_keys!(rows, [10, 20, 30, 5]);
    Ok(())
}

#[test]
fn ascending_counts_keep_ascending_key_tie_break() -> Result<()> {
    let asc = Ranking::by_count_asc(|n: &u64| *n);
    let rows = rank(entries(&[(3, 9), (2, 1), (1, 1)]), &asc, Limit::Top(2), RankStrategy::Select);
    assert_ranked_keys!(rows, [1, 2]);

    let reversed = by_count().reversed();
    let rows = rank(entries(&[(3, 9), (2, 1), (1, 1)]), &reversed, Limit::All, RankStrategy::FullSort);
    assert_ranked_keys!(rows, [1, 2, 3]);
    Ok(())
}

#[test]
fn limit_larger_than_store_returns_everything() -> Result<()> {
    let rows = rank(entries(&[(1, 1), (2, 2)]), &by_count(), Limit::Top(10), RankStrategy::Select);
    assert_eq!(rows, vec![(2, 2), (1, 1)]);
    Ok(())
}

#[test]
fn zero_and_negative_limits_are_empty() -> Result<()> {
    assert_eq!(Limit::from_signed(None), Limit::All);
    assert_eq!(Limit::from_signed(Some(0)), Limit::Top(0));
    assert_eq!(Limit::from_signed(Some(-3)), Limit::Top(0));
    assert_eq!(Limit::from_signed(Some(4)), Limit::Top(4));

    for n in [Some(0), Some(-1)] {
        let rows = rank(entries(&[(1, 1)]), &by_count(), Limit::from_signed(n), RankStrategy::FullSort);
        assert!(rows.is_empty());
    }
    Ok(())
}

#[test]
fn metric_rankings_use_a_total_order() -> Result<()> {
    let by_rate = Ranking::by_metric_desc(|r: &f64| *r);
    let rows = rank(
        vec![("a", 0.5), ("b", f64::NAN), ("c", 0.9), ("d", 0.5)],
        &by_rate,
        Limit::All,
        RankStrategy::FullSort,
    );
    // NaN sorts above every number under the total order
    assert_ranked_keys!(rows, ["b", "c", "a", "d"]);

    let lowest = Ranking::by_metric_asc(|r: &f64| *r);
    let rows = rank(vec![("a", 0.5), ("c", 0.1)], &lowest, Limit::Top(1), RankStrategy::Select);
    assert_approx_eq!(rows[0].1, 0.1);
    Ok(())
}

#[test]
fn then_breaks_ties_before_the_key() -> Result<()> {
    let by_first = Ranking::by_count_desc(|a: &(u64, u64)| a.0);
    let by_second = Ranking::by_count_desc(|a: &(u64, u64)| a.1);
    let rows = rank(
        vec![("x", (5, 1)), ("y", (5, 7)), ("z", (6, 0))],
        &by_first.then(by_second),
        Limit::All,
        RankStrategy::FullSort,
    );
    assert_ranked_keys!(rows, ["z", "y", "x"]);
    Ok(())
}

#[test]
fn distance_ranking_puts_unlocated_entries_last() -> Result<()> {
    let nearest = Ranking::by_distance_from(
        0i64,
        |_: &&'static str, at: &Option<i64>| *at,
        |a: &i64, b: &i64| (a - b).abs() as f64,
    );
    let rows = rank(
        vec![("far", Some(-40)), ("lost", None), ("near", Some(3)), ("mid", Some(10))],
        &nearest,
        Limit::All,
        RankStrategy::FullSort,
    );
    assert_ranked_keys!(rows, ["near", "mid", "far", "lost"]);
    Ok(())
}

#[test]
fn natural_key_lists_in_key_order() -> Result<()> {
    let listing = Ranking::natural_key();
    assert_eq!(listing.compare((&1u16, &9u64), (&2, &0)), Ordering::Less);
    let rows = rank(entries(&[(9, 0), (3, 5), (4, 1)]), &listing, Limit::Top(2), RankStrategy::Select);
    assert_ranked_keys!(rows, [3, 4]);
    Ok(())
}

#[test]
fn custom_comparator_via_new() -> Result<()> {
    // even counts first, then larger counts
    let evens_first = Ranking::new(|a: (&u16, &u64), b: (&u16, &u64)| {
        (a.1 % 2).cmp(&(b.1 % 2)).then_with(|| b.1.cmp(a.1))
    });
    let rows = rank(entries(&[(1, 3), (2, 4), (3, 2), (4, 7)]), &evens_first, Limit::All, RankStrategy::Select);
    assert_ranked_keys!(rows, [2, 3, 4, 1]);
    Ok(())
}

#[test]
fn duplicate_keys_keep_input_order_under_both_strategies() -> Result<()> {
    let entries: Vec<(u8, (u64, usize))> = (0..40).map(|i| (1, (1, i))).collect();
    let by_first = Ranking::by_count_desc(|a: &(u64, usize)| a.0);

    for n in [1, 3, 20, 39, 40] {
        let full = rank(entries.clone(), &by_first, Limit::Top(n), RankStrategy::FullSort);
        let select = rank(entries.clone(), &by_first, Limit::Top(n), RankStrategy::Select);
        let order: Vec<usize> = select.iter().map(|(_, a)| a.1).collect();
        assert_eq!(order, (0..n).collect::<Vec<_>>(), "top {n}");
        assert_eq!(select, full, "top {n}");
    }
    Ok(())
}

#[test]
fn large_positive_limits_saturate() -> Result<()> {
    assert_eq!(Limit::from_signed(Some(i64::MIN)), Limit::Top(0));
    let big = Limit::from_signed(Some(i64::MAX));
    assert!(matches!(big, Limit::Top(n) if n > 0));
    assert_eq!(big.resolve(3), 3);
    let rows = rank(entries(&[(1, 1), (2, 2)]), &by_count(), big, RankStrategy::Select);
    assert_eq!(rows.len(), 2);
    Ok(())
}
