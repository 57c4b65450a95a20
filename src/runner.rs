//! Execution of an accumulator specification over a record source.
//!
//! The runner decides *how* records are folded, never *what* is computed:
//!
//! - [`ExecMode::Sequential`] -- one store, records folded in source order.
//! - [`ExecMode::Parallel`] -- the input is split into contiguous shards, each
//!   shard is folded into its own store on a rayon worker, and the shard
//!   stores are merged in shard-index order.
//!
//! Both modes produce the same finalized store because every accumulator
//! merges associatively. Stores are never shared between threads while they
//! are being built.

use crate::accumulator::AccumulatorSpec;
use crate::config::EngineConfig;
use crate::rank::{Limit, RankStrategy, Ranking};
use crate::store::{AggregationStore, Finalized};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    /// `threads` builds a dedicated rayon pool; `shards` overrides the runner's default shard count.
    Parallel {
        threads: Option<usize>,
        shards: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_shards: usize,
    /// Merge breadth per reduction round; `None` merges shard stores left to right.
    pub merge_fanout: Option<usize>,
    pub strategy: RankStrategy,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                shards: None,
            },
            default_shards: 2 * num_cpus::get().max(2),
            merge_fanout: None,
            strategy: RankStrategy::FullSort,
        }
    }
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>, shards: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel { threads, shards },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn from_config(cfg: &EngineConfig) -> Self {
        let mode = if cfg.parallel {
            ExecMode::Parallel {
                threads: cfg.threads,
                shards: cfg.shards,
            }
        } else {
            ExecMode::Sequential
        };
        Self {
            mode,
            merge_fanout: cfg.merge_fanout,
            strategy: cfg.rank_strategy,
            ..Default::default()
        }
    }

    /// Fold an in-memory record slice into a finalized store.
    pub fn aggregate<R, S>(&self, spec: &S, records: &[R]) -> Finalized<S::Key, S::Acc>
    where
        R: Sync,
        S: AccumulatorSpec<R>,
    {
        let started = Instant::now();
        let store = match self.mode {
            ExecMode::Sequential => {
                let mut store = AggregationStore::new();
                store.extend(spec, records);
                store
            }
            ExecMode::Parallel { threads, shards } => {
                let n = shards
                    .unwrap_or(self.default_shards)
                    .max(1)
                    .min(records.len().max(1));
                let chunk = records.len().div_ceil(n).max(1);
                let fanout = self.merge_fanout;
                with_pool(threads, || {
                    let locals: Vec<AggregationStore<S::Key, S::Acc>> = records
                        .par_chunks(chunk)
                        .enumerate()
                        .map(|(i, shard)| {
                            let mut store = AggregationStore::new();
                            store.extend(spec, shard);
                            tracing::debug!(shard = i, records = shard.len(), groups = store.len(), "shard folded");
                            store
                        })
                        .collect();
                    AggregationStore::merge_all(locals, fanout)
                })
            }
        };
        finish(store, started)
    }

    /// Fold a fallible, single-pass record source sequentially.
    ///
    /// # Errors
    /// The first error produced by `records`, unchanged.
    pub fn try_aggregate<R, S, I, E>(&self, spec: &S, records: I) -> Result<Finalized<S::Key, S::Acc>, E>
    where
        S: AccumulatorSpec<R>,
        I: IntoIterator<Item = Result<R, E>>,
    {
        let started = Instant::now();
        let mut store = AggregationStore::new();
        store.try_extend(spec, records)?;
        Ok(finish(store, started))
    }

    /// Fold caller-partitioned, fallible shards and merge them in shard order.
    ///
    /// In parallel mode every shard is drained on its own rayon worker. When
    /// several shards fail, the error of the lowest shard index is returned.
    ///
    /// # Errors
    /// The first shard error, unchanged.
    pub fn try_aggregate_shards<R, S, I, E>(
        &self,
        spec: &S,
        shards: Vec<I>,
    ) -> Result<Finalized<S::Key, S::Acc>, E>
    where
        S: AccumulatorSpec<R>,
        I: IntoIterator<Item = Result<R, E>> + Send,
        E: Send,
    {
        let started = Instant::now();
        let fold_shard = |i: usize, shard: I| -> Result<AggregationStore<S::Key, S::Acc>, E> {
            let mut store = AggregationStore::new();
            store.try_extend(spec, shard)?;
            tracing::debug!(shard = i, records = store.records_seen(), groups = store.len(), "shard folded");
            Ok(store)
        };

        let results: Vec<Result<AggregationStore<S::Key, S::Acc>, E>> = match self.mode {
            ExecMode::Sequential => shards
                .into_iter()
                .enumerate()
                .map(|(i, s)| fold_shard(i, s))
                .collect(),
            ExecMode::Parallel { threads, .. } => with_pool(threads, || {
                shards
                    .into_par_iter()
                    .enumerate()
                    .map(|(i, s)| fold_shard(i, s))
                    .collect()
            }),
        };
        let locals = results.into_iter().collect::<Result<Vec<_>, E>>()?;
        Ok(finish(AggregationStore::merge_all(locals, self.merge_fanout), started))
    }

    /// Aggregate, then rank with the runner's strategy.
    pub fn report<R, S>(
        &self,
        spec: &S,
        records: &[R],
        ranking: &Ranking<S::Key, S::Acc>,
        limit: Limit,
    ) -> Vec<(S::Key, S::Acc)>
    where
        R: Sync,
        S: AccumulatorSpec<R>,
    {
        self.aggregate(spec, records)
            .rank_with(ranking, limit, self.strategy)
    }
}

fn finish<K, A>(store: AggregationStore<K, A>, started: Instant) -> Finalized<K, A>
where
    K: crate::accumulator::GroupKey,
    A: crate::accumulator::Combine,
{
    let mut done = store.finalize();
    done.set_elapsed(started.elapsed());
    done.metrics().log();
    done
}

fn with_pool<T, F>(threads: Option<usize>, f: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let Some(t) = threads else {
        return f();
    };
    match rayon::ThreadPoolBuilder::new().num_threads(t).build() {
        Ok(pool) => pool.install(f),
        Err(e) => {
            tracing::warn!(error = %e, threads = t, "could not build rayon pool; using the global pool");
            f()
        }
    }
}
