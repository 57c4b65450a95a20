//! Run metrics for one aggregation.
//!
//! Every [`Finalized`](crate::store::Finalized) store carries a [`RunMetrics`]
//! snapshot: how many records were read, how many survived the filter, how
//! many groups and shards took part and how long the fold took. The counters
//! are merged together with the stores they describe, so a sharded run reports
//! the same totals as a sequential one.
//!
//! # Example
//!
//! ```
//! use flightrank::accumulator::FnSpec;
//! use flightrank::runner::Runner;
//!
//! let spec = FnSpec::lifted(|x: &u32| x % 3, |_: &u32| 1u64).with_filter(|x: &u32| *x < 90);
//! let data: Vec<u32> = (0..100).collect();
//!
//! let store = Runner::default().aggregate(&spec, &data);
//! let m = store.metrics();
//! assert_eq!(m.records_seen, 100);
//! assert_eq!(m.records_filtered(), 10);
//! assert_eq!(m.groups, 3);
//! ```

use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Counters describing one engine invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    /// Records offered to the filter.
    pub records_seen: u64,
    /// Records accepted by the filter and folded.
    pub records_included: u64,
    /// Distinct keys in the finalized store.
    pub groups: usize,
    /// Shards folded independently and merged into the final store.
    pub shards: usize,
    /// Wall time of the fold and merge phases, when measured by a runner.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_millis")]
    pub elapsed: Option<Duration>,
}

impl RunMetrics {
    /// Records rejected by the filter.
    #[must_use]
    pub const fn records_filtered(&self) -> u64 {
        self.records_seen.saturating_sub(self.records_included)
    }

    /// Metrics as a JSON object, `elapsed` in milliseconds.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({}))
    }

    /// Emit the metrics as a structured `tracing` event.
    pub fn log(&self) {
        tracing::info!(
            records_seen = self.records_seen,
            records_included = self.records_included,
            records_filtered = self.records_filtered(),
            groups = self.groups,
            shards = self.shards,
            elapsed_ms = self.elapsed.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "aggregation finalized"
        );
    }
}

#[allow(clippy::ref_option)]
fn as_millis<S: serde::Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => s.serialize_u128(d.as_millis()),
        None => s.serialize_none(),
    }
}
