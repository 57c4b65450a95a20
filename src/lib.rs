//! # Flightrank
//!
//! A **grouped aggregation and ranking engine** for Rust, with a ready-made set of
//! reports over the public airline on-time dataset. Flightrank folds a finite
//! record source into per-key accumulators, derives metrics from them and
//! returns the top entries in a deterministic order.
//!
//! ## Key Features
//!
//! - **Declarative reports** - describe a report as filter, key, seed and fold functions
//! - **Mergeable accumulators** - counters, min/max, means and distinct sets merge associatively
//! - **Sequential and parallel execution** - shard the input over Rayon, merge in shard order
//! - **Deterministic ranking** - ties always break by ascending key
//! - **Derived metrics on read** - rates and averages are never stored, so they never go stale
//! - **Record sources** - CSV and JSON Lines (optional via feature flags)
//!
//! ## Quick Start
//!
//! ```
//! use flightrank::*;
//!
//! // arrivals per airport, with the share that were cancelled
//! let spec = FnSpec::lifted(
//!     |r: &(&'static str, bool)| r.0.to_string(),
//!     |r: &(&'static str, bool)| (1u64, u64::from(r.1)),
//! );
//! let records = vec![("IAH", false), ("ORD", true), ("IAH", true), ("IAH", false)];
//!
//! let rows = Runner::sequential().report(
//!     &spec,
//!     &records,
//!     &Ranking::by_count_desc(|a: &(u64, u64)| a.0),
//!     Limit::Top(1),
//! );
//!
//! assert_eq!(rows[0].0, "IAH");
//! assert_eq!(rate(rows[0].1.1, rows[0].1.0), 1.0 / 3.0);
//! ```
//!
//! ## Core Concepts
//!
//! ### Accumulator specifications
//!
//! An [`AccumulatorSpec`] decides which records take part in a report
//! (`filter`), how they are grouped (`key`) and how each group's accumulator is
//! started (`seed`) and updated (`fold`). [`FnSpec`] builds one from closures;
//! [`FnSpec::lifted`] derives the fold from the accumulator's [`Combine`] rule.
//!
//! ### Aggregation stores
//!
//! An [`AggregationStore`] is the key → accumulator map of one run. Stores built
//! over disjoint shards merge into the same result a single sequential fold gives.
//! [`AggregationStore::finalize`] closes the store; ranking a [`Finalized`] store
//! consumes it.
//!
//! ### Rankings
//!
//! A [`Ranking`] orders `(key, accumulator)` entries by a counter, a derived metric
//! or proximity to a reference point. [`Limit`] caps the number of rows returned.
//!
//! ### Execution Modes
//!
//! - **Sequential** - [`Runner::sequential`] folds on the calling thread
//! - **Parallel** - [`Runner::parallel`] folds contiguous shards on a Rayon pool
//!
//! Both modes produce the same rows.
//!
//! ## Module Overview
//!
//! - [`accumulator`] - the [`Combine`] and [`AccumulatorSpec`] traits, [`FnSpec`]
//! - [`combiners`] - built-in accumulator fields ([`Min`], [`Max`], [`First`], [`Mean`])
//! - [`derive`] - rates, averages and cardinalities computed from raw accumulators
//! - [`store`] - aggregation stores and their merge rules
//! - [`rank`] - rankings, limits and Top-K extraction
//! - [`runner`] - sequential and parallel execution
//! - [`source`] - CSV and JSON Lines record readers, shard partitioning
//! - [`config`] - engine and report configuration
//! - [`metrics`] - per-run counters, logged through `tracing`
//! - [`flights`] - flight records and the standard flight reports
//! - [`testing`] - assertions and fixtures for tests

pub mod accumulator;
pub mod combiners;
pub mod config;
pub mod derive;
pub mod flights;
pub mod metrics;
pub mod rank;
pub mod runner;
pub mod source;
pub mod store;
pub mod testing;

// General re-exports
pub use accumulator::{AccumulatorSpec, Combine, FnSpec, GroupKey};
pub use combiners::{First, Max, Mean, Min};
pub use config::{Config, EngineConfig, ReportConfig};
pub use derive::{average, cardinality, rate};
pub use metrics::RunMetrics;
pub use rank::{rank, Limit, RankStrategy, Ranking};
pub use runner::{ExecMode, Runner};
pub use store::{AggregationStore, Finalized};

// Gated re-exports
#[cfg(feature = "io-csv")]
pub use source::{csv_records, open_csv};

#[cfg(feature = "io-jsonl")]
pub use source::{jsonl_records, open_jsonl};
