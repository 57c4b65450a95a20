//! Engine and report configuration.
//!
//! Configuration is plain data passed into the runner and the report
//! builders; nothing is read from process-wide state. Both sections have
//! defaults, so an empty JSON object is a valid configuration.
//!
//! ```
//! use flightrank::config::Config;
//! use flightrank::rank::{Limit, RankStrategy};
//!
//! let cfg = Config::from_json_str(r#"{
//!     "engine": { "parallel": true, "threads": 4, "rank_strategy": "select" },
//!     "report": { "limit": 10, "distance_ranges": [[0, 500], [500, 1500], [1500, null]] }
//! }"#)?;
//!
//! assert_eq!(cfg.engine.threads, Some(4));
//! assert_eq!(cfg.engine.rank_strategy, RankStrategy::Select);
//! assert_eq!(cfg.report.limit(), Limit::Top(10));
//! assert_eq!(cfg.report.distance_ranges.len(), 3);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::flights::BucketSet;
use crate::rank::{Limit, RankStrategy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration file layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub report: ReportConfig,
}

impl Config {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    /// Malformed JSON, unknown fields, or invalid bucket ranges.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parse configuration")
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// The file cannot be read or does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load {}", path.display()))
    }
}

/// How the engine schedules folding and ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fold shards on a rayon pool; `false` folds on the calling thread.
    pub parallel: bool,
    pub threads: Option<usize>,
    pub shards: Option<usize>,
    pub merge_fanout: Option<usize>,
    pub rank_strategy: RankStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            shards: None,
            merge_fanout: None,
            rank_strategy: RankStrategy::FullSort,
        }
    }
}

/// Parameters of the standard flight reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Rows to keep; absent means all, `<= 0` means none.
    pub limit: Option<i64>,
    /// Flight distance buckets, in miles.
    pub distance_ranges: BucketSet,
    /// Aircraft age buckets, in years.
    pub age_ranges: BucketSet,
    /// Year against which aircraft age is measured.
    pub reference_year: u16,
}

impl ReportConfig {
    #[must_use]
    pub fn limit(&self) -> Limit {
        Limit::from_signed(self.limit)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: None,
            distance_ranges: BucketSet::from_edges(&[0, 500, 1000, 1500, 2000]),
            age_ranges: BucketSet::from_edges(&[0, 5, 10, 20]),
            reference_year: 2008,
        }
    }
}
